//! Configuration for the storegate dashboard.
//!
//! Settings come from an optional TOML file plus environment overrides. The
//! role permission table is part of the configuration and is frozen into a
//! [`PermissionTable`] once at start.
//!
//! # Usage
//!
//! ```rust
//! use storegate_config::{PermissionTable, StoregateConfig};
//!
//! let config = StoregateConfig::from_toml(r#"
//!     [roles]
//!     agent = ["orders"]
//! "#).unwrap();
//! let table = PermissionTable::from_config(&config);
//! assert!(table.permits("agent", "orders"));
//! assert!(!table.permits("agent", "dashboard"));
//! ```

pub mod error;
pub mod permission;
pub mod prelude;
pub mod storegate_config;

pub use permission::PermissionTable;
pub use storegate_config::{ApiConfig, GateConfig, ServerConfig, StoregateConfig};
