use crate::{
  construct::{TryClone, TryDefault},
  error::{VecError, VecResult},
  range::{construct_clone, construct_default, destroy_range, relocate},
  raw_buffer::RawBuffer,
  utils::{grow_cap, make_buffer_layout},
};
use std::{
  alloc::handle_alloc_error,
  fmt::{self, Debug, Display},
  mem,
  ops::{Deref, DerefMut},
  ptr, slice,
};

/// A growable contiguous array that owns its elements.
///
/// The first `len` slots of the backing buffer hold live values, the rest
/// are uninitialized. Every operation that allocates or constructs either
/// finishes or leaves the vector exactly as it found it. The one exception
/// is `push_clone`, which keeps any growth it performed when the copy
/// itself fails.
///
/// ## Example
/// ```
/// use laythe_vec::Vector;
///
/// let mut vector = Vector::new();
/// vector.push(1).unwrap();
/// vector.push(2).unwrap();
/// vector.push(3).unwrap();
///
/// assert_eq!(vector.len(), 3);
/// assert_eq!(vector.cap(), 4);
/// assert_eq!(vector[1], 2);
/// ```
pub struct Vector<T> {
  /// Storage for the elements
  buf: RawBuffer<T>,

  /// Number of live elements at the front of `buf`
  len: usize,
}

impl<T> Vector<T> {
  /// Create an empty vector. Nothing is allocated until the
  /// vector needs room for an element
  pub const fn new() -> Self {
    Self {
      buf: RawBuffer::empty(),
      len: 0,
    }
  }

  /// Retrieve the number of live elements
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Retrieve the number of allocated slots
  #[inline]
  pub fn cap(&self) -> usize {
    self.buf.cap()
  }

  /// Does this vector hold no elements
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// View the live elements as a slice
  pub fn as_slice(&self) -> &[T] {
    self
  }

  /// View the live elements as a mutable slice
  pub fn as_mut_slice(&mut self) -> &mut [T] {
    self
  }

  /// Ensure there is room for at least `cap` elements. When the vector
  /// has to grow it moves to a buffer of exactly `cap` slots. The
  /// elements are moved, not copied, so the only possible failure is
  /// allocation and it happens before anything is touched.
  ///
  /// ## Example
  /// ```
  /// use laythe_vec::Vector;
  ///
  /// let mut vector: Vector<u8> = Vector::new();
  /// vector.reserve(10).unwrap();
  ///
  /// assert_eq!(vector.cap(), 10);
  /// assert!(vector.is_empty());
  /// ```
  pub fn reserve(&mut self, cap: usize) -> VecResult<()> {
    if cap <= self.buf.cap() {
      return Ok(());
    }

    let buf = RawBuffer::allocate(cap)?;
    self.adopt(buf);
    Ok(())
  }

  /// Move to a buffer sized exactly to the live elements. An empty
  /// vector releases its storage entirely
  pub fn shrink_to_fit(&mut self) -> VecResult<()> {
    if self.buf.cap() > self.len {
      let buf = RawBuffer::allocate(self.len)?;
      self.adopt(buf);
    }

    Ok(())
  }

  /// Drop every element past `len`. Does nothing if the
  /// vector is already that short
  pub fn truncate(&mut self, len: usize) {
    if len >= self.len {
      return;
    }

    let tail = self.len - len;
    self.len = len;
    unsafe { destroy_range(self.buf.ptr().add(len), tail) };
  }

  /// Drop every element, keeping the storage
  pub fn clear(&mut self) {
    self.truncate(0);
  }

  /// Exchange contents with `other`. Never allocates, constructs or drops
  pub fn swap(&mut self, other: &mut Vector<T>) {
    mem::swap(self, other);
  }

  /// Push a new element onto the end of this vector. A full vector first
  /// doubles its capacity, an unallocated one grows to a single slot. If
  /// that growth fails `value` is dropped and the vector is unchanged
  pub fn push(&mut self, value: T) -> VecResult<()> {
    self.grow_for_push()?;

    unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
    self.len += 1;
    Ok(())
  }

  /// Remove the last element, returning it, or `None` if the vector is empty
  pub fn pop(&mut self) -> Option<T> {
    if self.len == 0 {
      return None;
    }

    self.len -= 1;
    unsafe { Some(ptr::read(self.buf.ptr().add(self.len))) }
  }

  /// Drop the last element.
  ///
  /// ## Panics
  /// Panics if the vector is empty
  pub fn pop_back(&mut self) {
    assert!(self.len > 0, "pop_back on an empty vector");
    self.truncate(self.len - 1);
  }

  /// Make room for one more element using the doubling policy
  fn grow_for_push(&mut self) -> VecResult<()> {
    if self.len == self.buf.cap() {
      self.reserve(grow_cap(self.buf.cap()))?;
    }

    Ok(())
  }

  /// Move the live elements into `buf` and release the current storage
  fn adopt(&mut self, buf: RawBuffer<T>) {
    debug_assert!(buf.cap() >= self.len);

    unsafe { relocate(self.buf.ptr(), buf.ptr(), self.len) };

    // the old buffer only holds moved from slots now
    self.buf = buf;
  }
}

impl<T: TryDefault> Vector<T> {
  /// Create a vector of `len` default constructed elements with a
  /// capacity of exactly `len`. If any element fails to construct the
  /// ones already built are dropped and the storage is released.
  ///
  /// ## Example
  /// ```
  /// use laythe_vec::Vector;
  ///
  /// let vector: Vector<i32> = Vector::with_len(3).unwrap();
  ///
  /// assert_eq!(vector.len(), 3);
  /// assert_eq!(vector.cap(), 3);
  /// assert_eq!(*vector, [0, 0, 0]);
  /// ```
  pub fn with_len(len: usize) -> VecResult<Self, T::Error> {
    let buf = RawBuffer::allocate(len).map_err(VecError::widen::<T::Error>)?;
    unsafe { construct_default(buf.ptr(), len) }.map_err(VecError::ElementConstruction)?;

    Ok(Self { buf, len })
  }

  /// Set the number of elements to `len`, default constructing new slots
  /// or dropping trailing elements. Growing past the capacity moves to a
  /// buffer of exactly `len` slots.
  ///
  /// When a new element fails to construct, every element this call built
  /// is dropped, any new buffer is released and the vector keeps its
  /// previous elements, length and capacity.
  pub fn resize(&mut self, len: usize) -> VecResult<(), T::Error> {
    if len > self.buf.cap() {
      let buf = RawBuffer::<T>::allocate(len).map_err(VecError::widen::<T::Error>)?;
      unsafe { construct_default(buf.ptr().add(self.len), len - self.len) }
        .map_err(VecError::ElementConstruction)?;

      self.adopt(buf);
    } else if len > self.len {
      unsafe { construct_default(self.buf.ptr().add(self.len), len - self.len) }
        .map_err(VecError::ElementConstruction)?;
    } else {
      self.truncate(len);
    }

    self.len = len;
    Ok(())
  }
}

impl<T: TryClone> Vector<T> {
  /// Create a vector holding a copy of each element in `slice`, with a
  /// capacity of exactly `slice.len()`
  pub fn from_slice(slice: &[T]) -> VecResult<Self, T::Error> {
    let buf = RawBuffer::allocate(slice.len()).map_err(VecError::widen::<T::Error>)?;
    unsafe { construct_clone(buf.ptr(), slice) }.map_err(VecError::ElementConstruction)?;

    Ok(Self {
      buf,
      len: slice.len(),
    })
  }

  /// Create an independent copy of this vector sized to its elements
  pub fn try_clone(&self) -> VecResult<Self, T::Error> {
    Self::from_slice(self)
  }

  /// Replace the contents of this vector with copies of `src`.
  ///
  /// The copies are built in a fresh buffer before the current elements
  /// are dropped, so a failed copy leaves this vector untouched.
  ///
  /// ## Example
  /// ```
  /// use laythe_vec::{vector, Vector};
  ///
  /// let mut dst = vector![1, 2, 3, 4, 5];
  /// let src = vector![7, 8];
  ///
  /// dst.assign(&src).unwrap();
  ///
  /// assert_eq!(dst, src);
  /// assert_eq!(dst.cap(), 2);
  /// ```
  pub fn assign(&mut self, src: &[T]) -> VecResult<(), T::Error> {
    let fresh = Self::from_slice(src)?;
    *self = fresh;
    Ok(())
  }

  /// Push a copy of `value` onto the end of this vector.
  ///
  /// Growth happens before the copy is made. If the copy fails the
  /// length is unchanged but the larger capacity is kept.
  pub fn push_clone(&mut self, value: &T) -> VecResult<(), T::Error> {
    self.grow_for_push().map_err(VecError::widen::<T::Error>)?;
    let value = value.try_clone().map_err(VecError::ElementConstruction)?;

    unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
    self.len += 1;
    Ok(())
  }
}

/// Unwrap a result whose only possible failure is allocation, reporting
/// that failure the way the standard collections do
fn or_alloc_error<T, R>(result: VecResult<R>) -> R {
  match result {
    Ok(value) => value,
    Err(VecError::AllocationFailure { cap }) => match make_buffer_layout::<T>(cap) {
      Some(layout) => handle_alloc_error(layout),
      None => panic!("capacity overflow"),
    },
    Err(VecError::ElementConstruction(never)) => match never {},
  }
}

impl<T> Drop for Vector<T> {
  fn drop(&mut self) {
    unsafe { destroy_range(self.buf.ptr(), self.len) };
  }
}

impl<T> Default for Vector<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone> Clone for Vector<T> {
  fn clone(&self) -> Self {
    or_alloc_error::<T, _>(self.try_clone())
  }

  fn clone_from(&mut self, source: &Self) {
    or_alloc_error::<T, _>(self.assign(source))
  }
}

impl<T> Deref for Vector<T> {
  type Target = [T];

  #[inline]
  fn deref(&self) -> &Self::Target {
    unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
  }
}

impl<T> DerefMut for Vector<T> {
  #[inline]
  fn deref_mut(&mut self) -> &mut Self::Target {
    unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
  }
}

impl<T: Clone> From<&[T]> for Vector<T> {
  fn from(slice: &[T]) -> Self {
    or_alloc_error::<T, _>(Vector::from_slice(slice))
  }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
  fn from(array: [T; N]) -> Self {
    let mut vector = Vector::new();
    or_alloc_error::<T, _>(vector.reserve(N));
    vector.extend(array);
    vector
  }
}

impl<T> Extend<T> for Vector<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for value in iter {
      or_alloc_error::<T, _>(self.push(value));
    }
  }
}

impl<T> FromIterator<T> for Vector<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut vector = Vector::new();
    vector.extend(iter);
    vector
  }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
  type Item = &'a mut T;
  type IntoIter = slice::IterMut<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

impl<T: PartialEq> PartialEq for Vector<T> {
  #[inline]
  fn eq(&self, other: &Vector<T>) -> bool {
    **self == **other
  }
}
impl<T: Eq> Eq for Vector<T> {}

impl<T: Display> Display for Vector<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[")?;

    if let Some((last, rest)) = self.split_last() {
      for item in rest.iter() {
        write!(f, "{item}, ")?;
      }

      write!(f, "{last}")?;
    }

    write!(f, "]")
  }
}

impl<T: Debug> Debug for Vector<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T> fmt::Pointer for Vector<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Pointer::fmt(&self.buf, f)
  }
}
