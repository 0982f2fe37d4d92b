//! Common types and utilities.

/// Dashboard service error type.
pub use crate::error::Error;

/// Dashboard service result type.
pub type Result<T> = core::result::Result<T, Error>;
