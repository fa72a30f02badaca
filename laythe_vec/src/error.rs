use std::{
  convert::Infallible,
  error::Error,
  fmt::{self, Display},
};

/// The ways an operation on a `Vector` can fail. `E` is the error an
/// element constructor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VecError<E> {
  /// Storage for `cap` elements could not be allocated
  AllocationFailure { cap: usize },

  /// Constructing a single element failed
  ElementConstruction(E),
}

impl VecError<Infallible> {
  /// Lift an allocation only error into one that could also carry
  /// an element construction error
  pub fn widen<E>(self) -> VecError<E> {
    match self {
      VecError::AllocationFailure { cap } => VecError::AllocationFailure { cap },
      VecError::ElementConstruction(never) => match never {},
    }
  }
}

impl<E: Display> Display for VecError<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VecError::AllocationFailure { cap } => {
        write!(f, "Unable to allocate storage for {cap} elements.")
      }
      VecError::ElementConstruction(err) => write!(f, "Element construction failed: {err}"),
    }
  }
}

impl<E: Error + 'static> Error for VecError<E> {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      VecError::AllocationFailure { .. } => None,
      VecError::ElementConstruction(err) => Some(err),
    }
  }
}

pub type VecResult<T, E = Infallible> = Result<T, VecError<E>>;
