//! Storegate dashboard service.
//!
//! Hosts the admin dashboard routes behind the route permission gate and
//! forwards data operations to the external e-commerce API.

pub mod api;
pub mod error;
pub mod prelude;
pub mod state;
