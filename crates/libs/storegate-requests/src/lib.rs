//! HTTP client for the external e-commerce API.
//!
//! The dashboard has no backend of its own; every data operation is a single
//! call to the API server configured by `api.base_url`. Calls are independent
//! and are never retried: failures are returned to the caller to report.
//!
//! # Examples
//!
//! ```rust,no_run
//! use storegate_requests::{ApiClient, ad::AdStatus};
//!
//! # async fn example() -> storegate_requests::prelude::Result<()> {
//! let client = ApiClient::new("https://api.example.com")?.with_token("eyJ...");
//! client.update_ad_status("42", AdStatus::Active).await?;
//! # Ok(())
//! # }
//! ```

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::prelude::*;

pub mod ad;
pub mod error;
pub mod paypal;
pub mod prelude;
pub mod upload;

/// HTTP client bound to one API server.
///
/// Keeps no cookie jar: clones are handed to different callers, and the only
/// credential sent upstream is the bearer token set with [`ApiClient::with_token`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new API client with the given base URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::ClientBuilder::new().build()?;
        Ok(Self {
            url: url.into(),
            token: None,
            client,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// Constructs the full URL path for an endpoint.
    fn path(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and deserializes a successful JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("API request failed with {status}: {body}");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!("API response {status}");
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_without_double_slash() {
        let client = ApiClient::new("http://api.local/").unwrap();
        assert_eq!(
            client.path("/api/v1/ads/update/status/3"),
            "http://api.local/api/v1/ads/update/status/3"
        );
        let client = ApiClient::new("http://api.local").unwrap();
        assert_eq!(client.path("api/v1/x"), "http://api.local/api/v1/x");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("not here")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let request = client.client.get(client.path("missing"));
        let result = client.send::<serde_json::Value>(request).await;

        mock.assert_async().await;
        match result {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "not here");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn bearer_token_is_forwarded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/me")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap().with_token("abc");
        let request = client.client.get(client.path("me"));
        client.send::<serde_json::Value>(request).await.unwrap();
        mock.assert_async().await;
    }
}
