//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] storegate_auth::error::Error),

    #[error(transparent)]
    Api(#[from] storegate_requests::error::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API Forbidden")]
    ApiForbidden,

    #[error("Context Missing")]
    CtxMissing,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, message) = match &self {
            Error::ApiForbidden => (StatusCode::FORBIDDEN, "Access forbidden"),
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            Error::Auth(err) => match err {
                storegate_auth::error::Error::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "Invalid authentication token")
                }
                storegate_auth::error::Error::TokenMissing => {
                    (StatusCode::UNAUTHORIZED, "Authentication required")
                }
                storegate_auth::error::Error::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "Authentication token expired")
                }
                storegate_auth::error::Error::Jwt(_)
                | storegate_auth::error::Error::MissingSecret
                | storegate_auth::error::Error::InvalidDuration => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            Error::Api(err) => match err {
                storegate_requests::error::Error::EmptyUpload => {
                    (StatusCode::BAD_GATEWAY, "Upload failed: no file stored")
                }
                storegate_requests::error::Error::PaymentRejected(_) => {
                    (StatusCode::BAD_GATEWAY, "Payment could not be started")
                }
                storegate_requests::error::Error::Status { .. }
                | storegate_requests::error::Error::Http(_)
                | storegate_requests::error::Error::Json(_) => {
                    (StatusCode::BAD_GATEWAY, "Upstream API request failed")
                }
            },
            Error::CtxMissing => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
