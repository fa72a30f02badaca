#![deny(clippy::all)]
#[macro_use]
mod macros;
mod construct;
mod error;
mod range;
mod raw_buffer;
mod vector;
pub mod utils;

#[cfg(test)]
mod support;

pub use construct::{TryClone, TryDefault};
pub use error::{VecError, VecResult};
pub use range::{construct_clone, construct_default, construct_range, destroy_range, relocate};
pub use raw_buffer::RawBuffer;
pub use vector::Vector;
