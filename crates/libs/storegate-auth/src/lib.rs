//! Signed-token authentication for the storegate dashboard.
//!
//! Credentials presented to the dashboard are HS256 JSON Web Tokens carrying
//! the caller's identity and role. This crate owns the signing keys, the claim
//! layout and the verification rules. Verification always fails closed: a
//! token that is missing, malformed, wrongly signed or expired never yields
//! claims.

pub mod auth_body;
pub mod auth_token;
pub mod error;
pub mod jwt;
pub mod prelude;

/// Token type advertised alongside issued tokens.
pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
/// Issuer stamped into, and required from, every token.
pub const ISS: &str = "storegate";

pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
