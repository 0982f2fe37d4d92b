#![allow(dead_code)]

use chrono::{TimeDelta, Utc};
use mockito::ServerGuard;
use reqwest::redirect::Policy;
use storegate_auth::auth_token::{AuthToken, encode_token};
use storegate_auth::jwt::Keys;
use storegate_config::StoregateConfig;
use storegated::{api::setup_api, state::AppState};

pub const SECRET: &[u8] = b"integration-secret";

/// A running dashboard wired to a mock API server.
pub struct TestContext {
    pub base: String,
    pub api: ServerGuard,
    pub client: reqwest::Client,
}

impl TestContext {
    pub async fn new() -> Self {
        let api = mockito::Server::new_async().await;

        let mut config = StoregateConfig::default();
        config.server.bind = String::from("127.0.0.1:0");
        config.api.base_url = api.url();

        let keys = Keys::new(SECRET).expect("Failed to build keys");
        let state = AppState::new(&config, keys).expect("Failed to build state");
        let (addr, _handle) = setup_api(state, &config.server.bind)
            .await
            .expect("Failed to start dashboard");

        let client = reqwest::ClientBuilder::new()
            .redirect(Policy::none())
            .cookie_store(true)
            .build()
            .expect("Failed to build reqwest Client");

        Self {
            base: format!("http://{addr}"),
            api,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

pub fn token_signed_by(secret: &[u8], role: &str) -> String {
    let keys = Keys::new(secret).expect("Failed to build keys");
    let claims = AuthToken::new("user-1", role, TimeDelta::hours(1)).expect("Failed claims");
    encode_token(&keys, &claims)
        .expect("Failed to encode token")
        .access_token
}

pub fn token(role: &str) -> String {
    token_signed_by(SECRET, role)
}

pub fn expired_token(role: &str) -> String {
    let keys = Keys::new(SECRET).expect("Failed to build keys");
    let mut claims = AuthToken::new("user-1", role, TimeDelta::hours(1)).expect("Failed claims");
    let past = Utc::now().timestamp() - 7200;
    claims.iat = past;
    claims.nbf = past;
    claims.exp = past + 60;
    encode_token(&keys, &claims)
        .expect("Failed to encode token")
        .access_token
}

pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The `Set-Cookie` header for the auth cookie, if the response carries one.
pub fn set_cookie(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("auth-token="))
}
