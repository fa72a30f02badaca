/// Build a `Vector` from a list of elements, like `vec!`
///
/// ## Example
/// ```
/// use laythe_vec::{vector, Vector};
///
/// let empty: Vector<i32> = vector![];
/// let numbers = vector![1, 2, 3];
///
/// assert!(empty.is_empty());
/// assert_eq!(*numbers, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! vector {
  () => {
    $crate::Vector::new()
  };
  ($($x:expr),+ $(,)?) => {
    $crate::Vector::from([$($x),+])
  };
}
