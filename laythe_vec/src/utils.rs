use std::{alloc::Layout, mem};

/// The factor a full buffer's capacity is multiplied by on push
pub const VEC_GROW_FACTOR: usize = 2;

/// The capacity of the first buffer a push into an empty vector allocates
pub const VEC_INITIAL_CAP: usize = 1;

/// Is `T` zero sized. Buffers of zero sized types never touch the allocator
pub const fn is_zst<T>() -> bool {
  mem::size_of::<T>() == 0
}

/// Create a rust `Layout` for a buffer of `cap` slots of `T`. Returns
/// `None` when the byte size of the buffer would overflow `isize`
pub fn make_buffer_layout<T>(cap: usize) -> Option<Layout> {
  Layout::array::<T>(cap).ok()
}

/// The capacity a full buffer of `cap` slots grows to
pub const fn grow_cap(cap: usize) -> usize {
  if cap == 0 {
    VEC_INITIAL_CAP
  } else {
    cap.saturating_mul(VEC_GROW_FACTOR)
  }
}
