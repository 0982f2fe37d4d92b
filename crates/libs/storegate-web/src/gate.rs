//! Route permission gate.
//!
//! Every navigation under the gated prefix is checked against the role
//! permission table before it reaches a handler. The resource being opened is
//! the segment right after the prefix: `/dashboard/orders/42` opens `orders`,
//! while the bare prefix `/dashboard` opens the home resource `dashboard`.
//!
//! The gate fails closed. A request without a credential is sent to the login
//! page; a request whose credential does not verify, or whose role does not
//! list the resource, is sent to the forbidden page.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use storegate_auth::error::Error as AuthError;
use storegate_config::{GateConfig, PermissionTable};
use tracing::{info, warn};

use crate::ctx::resolver::CtxResult;
use crate::prelude::*;

/// Outcome of checking one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is outside the gated prefix.
    Bypass,
    /// Caller may open the resource.
    Allow,
    /// Navigation is rewritten to this path.
    Redirect(String),
}

/// Shared gate state: the frozen permission table and gate paths.
#[derive(Debug, Clone)]
pub struct RouteGate {
    pub table: Arc<PermissionTable>,
    pub config: Arc<GateConfig>,
}

impl RouteGate {
    pub fn new(table: PermissionTable, config: GateConfig) -> Self {
        Self {
            table: Arc::new(table),
            config: Arc::new(config),
        }
    }

    pub fn decide(&self, path: &str, ctx: &CtxResult) -> GateDecision {
        decide(&self.config, &self.table, path, ctx)
    }
}

/// Resource opened by `path`, or `None` when the path is not gated.
///
/// ```rust
/// use storegate_config::GateConfig;
/// use storegate_web::gate::resource_of;
///
/// let gate = GateConfig::default();
/// assert_eq!(resource_of(&gate, "/dashboard/orders"), Some("orders"));
/// assert_eq!(resource_of(&gate, "/dashboard/orders/42/edit"), Some("orders"));
/// assert_eq!(resource_of(&gate, "/dashboard"), Some("dashboard"));
/// assert_eq!(resource_of(&gate, "/products"), None);
/// ```
pub fn resource_of<'a>(gate: &'a GateConfig, path: &'a str) -> Option<&'a str> {
    if !gate.covers(path) {
        return None;
    }
    let prefix = gate.prefix.trim_end_matches('/');
    let rest = path[prefix.len()..].trim_start_matches('/');
    match rest.split('/').next() {
        Some(segment) if !segment.is_empty() => Some(segment),
        _ => Some(home_resource(prefix)),
    }
}

/// Last segment of the prefix, the resource behind the bare prefix.
fn home_resource(prefix: &str) -> &str {
    prefix.rsplit('/').next().unwrap_or(prefix)
}

/// Decides whether a navigation to `path` may proceed.
pub fn decide(
    gate: &GateConfig,
    table: &PermissionTable,
    path: &str,
    ctx: &CtxResult,
) -> GateDecision {
    let Some(resource) = resource_of(gate, path) else {
        return GateDecision::Bypass;
    };

    match ctx {
        Ok(ctx) if table.permits(&ctx.role, resource) => GateDecision::Allow,
        Ok(ctx) => {
            warn!(
                "Role '{}' of '{}' may not open '{resource}' ({path})",
                ctx.role, ctx.user
            );
            GateDecision::Redirect(gate.forbidden_path.clone())
        }
        Err(AuthError::TokenMissing) => {
            info!("No credential for {path}, sending to login");
            GateDecision::Redirect(gate.login_path.clone())
        }
        Err(err) => {
            warn!("Rejected credential for {path}: {err}");
            GateDecision::Redirect(gate.forbidden_path.clone())
        }
    }
}

/// Middleware applying the gate. Must run inside the context resolver.
///
/// Redirects are temporary (307) so the method and body are preserved if the
/// caller retries after signing in.
#[axum::debug_middleware]
pub async fn mw_route_gate(
    State(gate): State<RouteGate>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let ctx = req
        .extensions()
        .get::<CtxResult>()
        .ok_or(Error::CtxMissing)?;

    match gate.decide(req.uri().path(), ctx) {
        GateDecision::Bypass | GateDecision::Allow => Ok(next.run(req).await),
        GateDecision::Redirect(target) => Ok(Redirect::temporary(&target).into_response()),
    }
}
