use std::convert::Infallible;

/// Default construction that may fail. Every `Default` type gets an
/// infallible implementation
pub trait TryDefault: Sized {
  type Error;

  fn try_default() -> Result<Self, Self::Error>;
}

/// Copy construction that may fail. Every `Clone` type gets an
/// infallible implementation
pub trait TryClone: Sized {
  type Error;

  fn try_clone(&self) -> Result<Self, Self::Error>;
}

impl<T: Default> TryDefault for T {
  type Error = Infallible;

  #[inline]
  fn try_default() -> Result<Self, Self::Error> {
    Ok(T::default())
  }
}

impl<T: Clone> TryClone for T {
  type Error = Infallible;

  #[inline]
  fn try_clone(&self) -> Result<Self, Self::Error> {
    Ok(self.clone())
  }
}
