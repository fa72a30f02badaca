use crate::{
  error::{VecError, VecResult},
  utils::{is_zst, make_buffer_layout},
};
use ptr::NonNull;
use std::{
  alloc::{alloc, dealloc},
  fmt,
  marker::PhantomData,
  ptr,
};

/// An owning handle to uninitialized storage for `cap` elements of `T`.
///
/// The buffer never constructs, reads or drops a `T`. It only hands out a
/// pointer to its slots and releases the allocation when dropped, so the
/// storage of a half finished operation is freed on every exit path.
///
/// ## Example
/// ```
/// use laythe_vec::RawBuffer;
///
/// let buf = RawBuffer::<u64>::allocate(8).unwrap();
///
/// assert_eq!(buf.cap(), 8);
/// assert!(buf.is_allocated());
/// ```
pub struct RawBuffer<T> {
  /// Pointer to the first slot, dangling when nothing is allocated
  ptr: NonNull<T>,

  /// Number of slots in the buffer
  cap: usize,

  /// Phantom data to hold the slot type
  data: PhantomData<T>,
}

impl<T> RawBuffer<T> {
  /// An unallocated buffer with no slots
  pub const fn empty() -> Self {
    Self {
      ptr: NonNull::dangling(),
      cap: 0,
      data: PhantomData,
    }
  }

  /// Request storage for `cap` elements without constructing any of them.
  /// A zero capacity or a zero sized `T` never reaches the allocator.
  pub fn allocate(cap: usize) -> VecResult<Self> {
    if cap == 0 {
      return Ok(Self::empty());
    }

    if is_zst::<T>() {
      return Ok(Self {
        ptr: NonNull::dangling(),
        cap,
        data: PhantomData,
      });
    }

    let Some(layout) = make_buffer_layout::<T>(cap) else {
      return Err(VecError::AllocationFailure { cap });
    };

    let buf = unsafe { alloc(layout) };
    let Some(ptr) = NonNull::new(buf as *mut T) else {
      return Err(VecError::AllocationFailure { cap });
    };

    #[cfg(feature = "vec_log_alloc")]
    log::trace!(
      "{:p} allocate {} bytes for {} {}",
      ptr,
      layout.size(),
      cap,
      std::any::type_name::<T>()
    );

    Ok(Self {
      ptr,
      cap,
      data: PhantomData,
    })
  }

  /// The number of slots in this buffer
  #[inline]
  pub fn cap(&self) -> usize {
    self.cap
  }

  /// Does this buffer own an allocation
  #[inline]
  pub fn is_allocated(&self) -> bool {
    self.cap > 0 && !is_zst::<T>()
  }

  /// Pointer to the first slot. Always non null and aligned, even
  /// when nothing is allocated
  #[inline]
  pub fn ptr(&self) -> *mut T {
    self.ptr.as_ptr()
  }
}

impl<T> Default for RawBuffer<T> {
  fn default() -> Self {
    Self::empty()
  }
}

impl<T> fmt::Pointer for RawBuffer<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Pointer::fmt(&self.ptr, f)
  }
}

impl<T> fmt::Debug for RawBuffer<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RawBuffer")
      .field("ptr", &self.ptr)
      .field("cap", &self.cap)
      .finish()
  }
}

impl<T> Drop for RawBuffer<T> {
  fn drop(&mut self) {
    if !self.is_allocated() {
      return;
    }

    if let Some(layout) = make_buffer_layout::<T>(self.cap) {
      #[cfg(feature = "vec_log_free")]
      log::trace!(
        "{:p} free {} bytes for {} {}",
        self.ptr,
        layout.size(),
        self.cap,
        std::any::type_name::<T>()
      );

      unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
    }
  }
}

unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}
