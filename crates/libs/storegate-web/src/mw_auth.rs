//! Authentication middleware for API routes.
//!
//! Dashboard pages are protected by the route gate, which redirects. JSON
//! routes outside the gated prefix use this middleware instead and answer with
//! an error status.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;

/// Middleware that requires a verified caller.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use storegate_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/session", get(session_handler))
///     .layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn session_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
