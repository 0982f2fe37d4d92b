//! Authentication error types.

#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Signing secret missing or empty")]
    MissingSecret,
    #[error("Token duration out of range")]
    InvalidDuration,
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
