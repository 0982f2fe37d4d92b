//! Context resolver for extracting the caller from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use storegate_auth::{
    AUTH_HEADER, AUTH_HEADER_PREFIX, auth_token::decode_token, error::Error as AuthError,
    jwt::Keys,
};
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use tracing::debug;

use crate::ctx::Ctx;
use crate::prelude::*;

/// The name of the cookie used to store authentication tokens.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// What the resolver leaves in the request extensions.
pub type CtxResult = std::result::Result<Ctx, AuthError>;

/// Pulls the raw token from the auth cookie, falling back to a bearer header.
pub fn extract_token(cookies: &Cookies, headers: &HeaderMap) -> Option<String> {
    cookies
        .get(AUTH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(AUTH_HEADER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
                .map(|s| s.trim().to_string())
        })
        .filter(|token| !token.is_empty())
}

/// Verifies a raw token into a context. Absence is [`AuthError::TokenMissing`].
pub fn resolve(keys: &Keys, token: Option<String>) -> CtxResult {
    let token = token.ok_or(AuthError::TokenMissing)?;
    decode_token(keys, &token).map(Ctx::from)
}

/// Middleware resolving the request context from the caller's token.
///
/// The outcome, success or failure, is stored in the request extensions for
/// the gate and for the [`Ctx`] extractor. A cookie holding a token that fails
/// verification is removed.
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use storegate_auth::jwt::Keys;
/// use storegate_web::ctx::resolver::mw_ctx_resolver;
///
/// let keys = Keys::new(b"secret").unwrap();
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(keys, mw_ctx_resolver));
/// ```
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(keys): State<Keys>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = resolve(&keys, extract_token(&cookies, &headers));

    if let Err(err) = &ctx {
        debug!("No authenticated context: {err}");
        if cookies.get(AUTH_TOKEN_COOKIE).is_some() {
            clear_auth_cookie(&cookies);
        }
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Stores the token in the auth cookie so later navigations carry it.
pub fn set_auth_cookie(cookies: &Cookies, token: String) {
    let mut cookie = Cookie::new(AUTH_TOKEN_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookies.add(cookie);
}

pub fn clear_auth_cookie(cookies: &Cookies) {
    let mut cookie = Cookie::from(AUTH_TOKEN_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<CtxResult>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use storegate_auth::auth_token::{AuthToken, encode_token};

    use super::*;

    fn keys() -> Keys {
        Keys::new(b"resolver-secret").unwrap()
    }

    #[test]
    fn missing_token() {
        assert!(matches!(resolve(&keys(), None), Err(AuthError::TokenMissing)));
    }

    #[test]
    fn valid_token_resolves() {
        let keys = keys();
        let claims = AuthToken::new("u-9", "admin", TimeDelta::minutes(5)).unwrap();
        let token = encode_token(&keys, &claims).unwrap().access_token;
        assert_eq!(resolve(&keys, Some(token)).unwrap(), Ctx::new("u-9", "admin"));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let keys = keys();
        let claims = AuthToken::new("u-9", "agent", TimeDelta::minutes(5)).unwrap();
        let mut token = encode_token(&keys, &claims).unwrap().access_token;
        token.push('x');
        assert!(matches!(
            resolve(&keys, Some(token)),
            Err(AuthError::InvalidToken)
        ));
    }
}
