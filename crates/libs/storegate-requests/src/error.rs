//! External API error types.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Transport failure or client construction failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Upload succeeded but the API listed no files.
    #[error("Upload response contained no files")]
    EmptyUpload,

    /// Payment provider did not approve the payment.
    #[error("Payment rejected: {0}")]
    PaymentRejected(String),
}
