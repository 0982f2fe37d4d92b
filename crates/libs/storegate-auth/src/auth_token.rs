//! Dashboard credential claims.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::ISS;
use crate::auth_body::AuthBody;
use crate::jwt::{Keys, jwt_decode, jwt_encode};
use crate::prelude::*;

/// Claims carried by a dashboard credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject (user id).
    pub sub: String,
    /// Role name used for the permission lookup.
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub jti: Uuid,
}

impl AuthToken {
    /// Creates claims for `sub` with `role`, valid from now for `token_duration`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use storegate_auth::auth_token::AuthToken;
    /// use chrono::TimeDelta;
    ///
    /// let token = AuthToken::new("user-1", "agent", TimeDelta::hours(12)).unwrap();
    /// assert_eq!(token.role, "agent");
    /// assert!(token.exp > token.iat);
    /// ```
    pub fn new(
        sub: impl Into<String>,
        role: impl Into<String>,
        token_duration: TimeDelta,
    ) -> Result<Self> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(Error::InvalidDuration)?;

        Ok(Self {
            sub: sub.into(),
            role: role.into(),
            iss: String::from(ISS),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4(),
        })
    }
}

/// Signs the claims and wraps them in an [`AuthBody`].
pub fn encode_token(keys: &Keys, token: &AuthToken) -> Result<AuthBody> {
    let token = jwt_encode(keys, token).map_err(|err| {
        error!("Failed to encode JWT {err}");
        err
    })?;

    Ok(AuthBody::new(token))
}

/// Verifies a token string and returns its claims.
///
/// Expired tokens map to [`Error::TokenExpired`]; every other failure maps to
/// [`Error::InvalidToken`].
///
/// # Examples
///
/// ```rust
/// use storegate_auth::auth_token::{AuthToken, decode_token, encode_token};
/// use storegate_auth::jwt::Keys;
/// use chrono::TimeDelta;
///
/// let keys = Keys::new(b"secret").unwrap();
/// let claims = AuthToken::new("user-1", "admin", TimeDelta::hours(1)).unwrap();
/// let body = encode_token(&keys, &claims).unwrap();
/// assert_eq!(decode_token(&keys, &body.access_token).unwrap(), claims);
/// ```
pub fn decode_token(keys: &Keys, token: &str) -> Result<AuthToken> {
    match jwt_decode::<AuthToken>(keys, token) {
        Ok(data) => Ok(data.claims),
        Err(Error::Jwt(err)) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
            warn!("Rejected expired token");
            Err(Error::TokenExpired)
        }
        Err(err) => {
            warn!("Failed to decode jwt token {err}");
            Err(Error::InvalidToken)
        }
    }
}
