use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::Redirect,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use storegate_auth::error::Error as AuthError;
use storegate_requests::{ad::AdStatusUpdate, paypal::PaypalPaymentRequest, upload::UPLOAD_FIELD};
use storegate_web::{
    ctx::{
        Ctx,
        resolver::{clear_auth_cookie, extract_token, mw_ctx_resolver, resolve, set_auth_cookie},
    },
    error::Error as WebError,
    gate::{mw_route_gate, resource_of},
    mw_auth::mw_require_auth,
    prelude::Result as WebResult,
};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

use crate::prelude::*;
use crate::state::AppState;

const ADS_RESOURCE: &str = "ads";
const ORDERS_RESOURCE: &str = "orders";

/// What a dashboard page needs to render for the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageView {
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user: String,
    pub role: String,
    /// Resources the caller's role may open, in menu order.
    pub resources: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub user: String,
    pub role: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub amount: String,
    pub currency: String,
}

pub fn router(state: AppState) -> Router {
    let prefix = state.gate.config.prefix.trim_end_matches('/').to_string();
    let gated = |path: &str| format!("{prefix}{path}");

    let authenticated_routes = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn(mw_require_auth));

    Router::new()
        .route(&gated(""), get(dashboard_home))
        .route(&gated("/{resource}"), get(dashboard_page))
        .route(&gated("/{resource}/{id}"), get(dashboard_item))
        .route(&gated("/{resource}/upload"), post(upload_file))
        .route(&gated("/{resource}/{id}/status"), put(update_ad_status))
        .route(&gated("/{resource}/{id}/paypal"), post(paypal_payment))
        .merge(authenticated_routes)
        .route("/session", post(open_session).delete(close_session))
        .route(&state.gate.config.login_path, get(login_page))
        .route(&state.gate.config.forbidden_path, get(forbidden_page))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            mw_route_gate,
        ))
        .layer(middleware::from_fn_with_state(
            state.keys.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `bind` and serves the dashboard in a background task.
pub async fn setup_api(
    state: AppState,
    bind: &str,
) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
    let app = router(state);
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;
    info!("listening on {addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    Ok((addr, handle))
}

fn page(state: &AppState, ctx: Ctx, resource: String, id: Option<String>) -> Json<PageView> {
    Json(PageView {
        resources: state.gate.table.allowed(&ctx.role).to_vec(),
        resource,
        id,
        user: ctx.user,
        role: ctx.role,
    })
}

async fn dashboard_home(State(state): State<AppState>, ctx: Ctx) -> Json<PageView> {
    let config = &state.gate.config;
    let home = resource_of(config, &config.prefix)
        .map(String::from)
        .unwrap_or_default();
    page(&state, ctx, home, None)
}

async fn dashboard_page(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(resource): Path<String>,
) -> Json<PageView> {
    page(&state, ctx, resource, None)
}

async fn dashboard_item(
    State(state): State<AppState>,
    ctx: Ctx,
    Path((resource, id)): Path<(String, String)>,
) -> Json<PageView> {
    page(&state, ctx, resource, Some(id))
}

async fn upload_file(
    State(state): State<AppState>,
    cookies: Cookies,
    headers: HeaderMap,
    Path(resource): Path<String>,
    mut multipart: Multipart,
) -> WebResult<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| WebError::BadRequest(err.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| WebError::BadRequest(err.to_string()))?;

        info!("Upload for {resource}: {file_name}");
        let file = state
            .api_as(extract_token(&cookies, &headers))
            .upload_file(file_name, &content_type, bytes.to_vec())
            .await?;
        return Ok(Json(file));
    }
    Err(WebError::BadRequest(format!(
        "multipart field '{UPLOAD_FIELD}' missing"
    )))
}

async fn update_ad_status(
    State(state): State<AppState>,
    cookies: Cookies,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
    Json(update): Json<AdStatusUpdate>,
) -> WebResult<Json<Value>> {
    if resource != ADS_RESOURCE {
        return Err(WebError::BadRequest(format!("{resource} has no status")));
    }
    let answer = state
        .api_as(extract_token(&cookies, &headers))
        .update_ad_status(&id, update.status)
        .await?;
    Ok(Json(answer))
}

/// Starts a PayPal payment and sends the browser to PayPal's approval page.
async fn paypal_payment(
    State(state): State<AppState>,
    cookies: Cookies,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
    Json(checkout): Json<CheckoutRequest>,
) -> WebResult<Redirect> {
    if resource != ORDERS_RESOURCE {
        return Err(WebError::BadRequest(format!(
            "{resource} cannot be paid for"
        )));
    }
    let payment = PaypalPaymentRequest {
        order_id: id,
        amount: checkout.amount,
        currency: checkout.currency,
    };
    let approval = state
        .api_as(extract_token(&cookies, &headers))
        .paypal_payment(&payment)
        .await?;
    Ok(Redirect::to(&approval.approval_url))
}

fn session_view(state: &AppState, ctx: Ctx) -> SessionView {
    SessionView {
        resources: state.gate.table.allowed(&ctx.role).to_vec(),
        user: ctx.user,
        role: ctx.role,
    }
}

/// Verifies a token issued by the API and stores it in the auth cookie.
async fn open_session(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(request): Json<SessionRequest>,
) -> WebResult<Json<SessionView>> {
    let ctx = resolve(&state.keys, Some(request.access_token.clone()))?;
    info!("Session opened for {} ({})", ctx.user, ctx.role);
    set_auth_cookie(&cookies, request.access_token);
    Ok(Json(session_view(&state, ctx)))
}

async fn close_session(cookies: Cookies) -> StatusCode {
    clear_auth_cookie(&cookies);
    StatusCode::NO_CONTENT
}

async fn me(State(state): State<AppState>, ctx: Ctx) -> Json<SessionView> {
    Json(session_view(&state, ctx))
}

async fn login_page() -> WebError {
    WebError::Auth(AuthError::TokenMissing)
}

async fn forbidden_page() -> WebError {
    WebError::ApiForbidden
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
