//! Shared application state.

use storegate_auth::jwt::Keys;
use storegate_config::{PermissionTable, StoregateConfig};
use storegate_requests::ApiClient;
use storegate_web::gate::RouteGate;

use crate::prelude::*;

/// Read-only state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub keys: Keys,
    pub gate: RouteGate,
    /// Client without caller credentials; see [`AppState::api_as`].
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: &StoregateConfig, keys: Keys) -> Result<Self> {
        Ok(Self {
            keys,
            gate: RouteGate::new(PermissionTable::from_config(config), config.gate.clone()),
            api: ApiClient::new(config.api.base_url.clone())?,
        })
    }

    /// API client forwarding the caller's own token, when there is one.
    pub fn api_as(&self, token: Option<String>) -> ApiClient {
        match token {
            Some(token) => self.api.clone().with_token(token),
            None => self.api.clone(),
        }
    }
}
