//! Role to resource permission table.

use std::collections::BTreeMap;

use crate::storegate_config::StoregateConfig;

pub const SUPERADMIN: &str = "superadmin";
pub const ADMIN: &str = "admin";
pub const AGENT: &str = "agent";

const SUPERADMIN_RESOURCES: [&str; 10] = [
    "dashboard",
    "orders",
    "products",
    "categories",
    "customers",
    "ads",
    "payments",
    "agents",
    "reports",
    "settings",
];
const ADMIN_RESOURCES: [&str; 7] = [
    "dashboard",
    "orders",
    "products",
    "categories",
    "customers",
    "ads",
    "payments",
];
const AGENT_RESOURCES: [&str; 3] = ["orders", "customers", "ads"];

/// Immutable mapping from role name to the ordered resources it may open.
///
/// Roles absent from the table are granted nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    roles: BTreeMap<String, Vec<String>>,
}

impl PermissionTable {
    pub fn new(roles: BTreeMap<String, Vec<String>>) -> Self {
        Self { roles }
    }

    /// Uses the configured `[roles]` table, or the built-in one when none is set.
    pub fn from_config(config: &StoregateConfig) -> Self {
        match &config.roles {
            Some(roles) => Self::new(roles.clone()),
            None => Self::default(),
        }
    }

    /// Resources granted to `role`, in table order. Empty for unknown roles.
    pub fn allowed(&self, role: &str) -> &[String] {
        self.roles.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn permits(&self, role: &str, resource: &str) -> bool {
        self.allowed(role).iter().any(|r| r == resource)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        let entry = |role: &str, resources: &[&str]| {
            (
                String::from(role),
                resources.iter().map(|r| String::from(*r)).collect(),
            )
        };
        Self::new(BTreeMap::from([
            entry(SUPERADMIN, &SUPERADMIN_RESOURCES),
            entry(ADMIN, &ADMIN_RESOURCES),
            entry(AGENT, &AGENT_RESOURCES),
        ]))
    }
}
