//! Dashboard configuration types.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::prelude::*;

/// Optional path to a TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "STOREGATE_CONFIG";
/// Overrides `api.base_url`.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1:3000"),
        }
    }
}

/// Route gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Path prefix the gate applies to.
    pub prefix: String,
    /// Where unauthorized navigations are sent.
    pub forbidden_path: String,
    /// Where navigations without any credential are sent.
    pub login_path: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            prefix: String::from("/dashboard"),
            forbidden_path: String::from("/forbidden"),
            login_path: String::from("/login"),
        }
    }
}

impl GateConfig {
    /// True when `path` is the prefix itself or lies below it.
    ///
    /// ```rust
    /// use storegate_config::GateConfig;
    ///
    /// let gate = GateConfig::default();
    /// assert!(gate.covers("/dashboard"));
    /// assert!(gate.covers("/dashboard/orders/7"));
    /// assert!(!gate.covers("/dashboards"));
    /// assert!(!gate.covers("/forbidden"));
    /// ```
    pub fn covers(&self, path: &str) -> bool {
        let prefix = self.prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("gate.prefix", &self.prefix),
            ("gate.forbidden_path", &self.forbidden_path),
            ("gate.login_path", &self.login_path),
        ] {
            if !value.starts_with('/') {
                return Err(Error::InvalidConfig(format!(
                    "{name} must start with '/', got '{value}'"
                )));
            }
        }
        if self.prefix.trim_end_matches('/').is_empty() {
            return Err(Error::InvalidConfig(String::from(
                "gate.prefix must not be the site root",
            )));
        }
        for (name, value) in [
            ("gate.forbidden_path", &self.forbidden_path),
            ("gate.login_path", &self.login_path),
        ] {
            if self.covers(value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} '{value}' lies under the gated prefix '{}'",
                    self.prefix
                )));
            }
        }
        Ok(())
    }
}

/// External API server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080"),
        }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoregateConfig {
    pub server: ServerConfig,
    pub gate: GateConfig,
    pub api: ApiConfig,
    /// Role name to ordered resource list. `None` selects the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeMap<String, Vec<String>>>,
}

impl StoregateConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        let config: Self = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Loads `STOREGATE_CONFIG` when set, otherwise defaults, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                info!("Loading configuration from {path}");
                Self::from_file(Path::new(&path))?
            }
            Err(_) => {
                warn!("{CONFIG_PATH_ENV} not set, using default configuration");
                Self::default()
            }
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(API_BASE_URL_ENV) {
            self.api.base_url = base_url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.gate.validate()?;
        if self.api.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig(String::from(
                "api.base_url must not be empty",
            )));
        }
        Ok(())
    }
}

impl Display for StoregateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bind={} prefix={} api={}",
            self.server.bind, self.gate.prefix, self.api.base_url
        )
    }
}
