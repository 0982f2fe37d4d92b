//! Error types for the dashboard service.
//!
//! Covers start-up failures: configuration, signing keys, the outbound client
//! and the listener. Request-level failures use the web layer's error.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] storegate_config::error::Error),

    #[error(transparent)]
    Auth(#[from] storegate_auth::error::Error),

    #[error(transparent)]
    Requests(#[from] storegate_requests::error::Error),
}
