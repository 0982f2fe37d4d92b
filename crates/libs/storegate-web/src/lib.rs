//! Web layer of the storegate dashboard.
//!
//! Provides the request context resolver, the route permission gate and the
//! mapping from errors to HTTP responses.

pub mod ctx;
pub mod error;
pub mod gate;
pub mod mw_auth;
pub mod prelude;
