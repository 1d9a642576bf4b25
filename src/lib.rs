//! A fixed-capacity circular buffer guarded by a single reader/writer lock.
//!
//! [`Ring`] keeps its elements in one pre-allocated storage and addresses
//! them relative to the newest one. Adding never evicts; [`Ring::push`]
//! overwrites the oldest element of a full ring, [`Ring::remove`] evicts from
//! the old end and [`Ring::set_capacity`] relocates the live elements into a
//! storage of a different size.

pub mod error;
pub mod index;
mod loom;
mod ring;
pub mod wrapper;

pub use crate::error::{Error, TryAddError};
pub use crate::ring::Ring;
pub use crate::wrapper::RingSink;
