use std::{mem, ptr};

use crate::construct::{TryClone, TryDefault};

/// Drops the prefix of slots a `construct_range` call has already
/// filled if the call exits early, through an error or a panic
struct ConstructGuard<T> {
  dst: *mut T,
  built: usize,
}

impl<T> Drop for ConstructGuard<T> {
  fn drop(&mut self) {
    unsafe { destroy_range(self.dst, self.built) }
  }
}

/// Construct `len` elements in place starting at `dst`, the element at
/// offset `i` produced by `f(i)`. If any construction fails every element
/// this call already built is dropped before the error is returned.
///
/// ## Safety
/// `dst..dst + len` must be valid for writes and hold no live values
pub unsafe fn construct_range<T, E, F>(dst: *mut T, len: usize, mut f: F) -> Result<(), E>
where
  F: FnMut(usize) -> Result<T, E>,
{
  let mut guard = ConstructGuard { dst, built: 0 };

  while guard.built < len {
    let value = f(guard.built)?;
    ptr::write(dst.add(guard.built), value);
    guard.built += 1;
  }

  mem::forget(guard);
  Ok(())
}

/// Default construct `len` elements in place starting at `dst`
///
/// ## Safety
/// Same as `construct_range`
pub unsafe fn construct_default<T: TryDefault>(dst: *mut T, len: usize) -> Result<(), T::Error> {
  construct_range(dst, len, |_| T::try_default())
}

/// Copy construct each element of `src` in place starting at `dst`
///
/// ## Safety
/// Same as `construct_range` with `len` of `src.len()`. `src` must not
/// overlap the destination
pub unsafe fn construct_clone<T: TryClone>(dst: *mut T, src: &[T]) -> Result<(), T::Error> {
  construct_range(dst, src.len(), |i| src[i].try_clone())
}

/// Drop the `len` live elements starting at `ptr`
///
/// ## Safety
/// `ptr..ptr + len` must hold live values that are never used again
pub unsafe fn destroy_range<T>(ptr: *mut T, len: usize) {
  ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, len));
}

/// Move `len` live elements from `src` to `dst`. Afterwards the source
/// slots are logically uninitialized
///
/// ## Safety
/// `src` must hold `len` live values, `dst` must have room for `len`
/// values and the two regions must not overlap
pub unsafe fn relocate<T>(src: *const T, dst: *mut T, len: usize) {
  ptr::copy_nonoverlapping(src, dst, len);
}
