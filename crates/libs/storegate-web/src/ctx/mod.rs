//! Request context for authenticated dashboard requests.

use serde::{Deserialize, Serialize};
use storegate_auth::auth_token::AuthToken;

pub mod resolver;

/// Identity and role of the caller, taken from a verified token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ctx {
    pub user: String,
    pub role: String,
}

impl Ctx {
    /// # Examples
    ///
    /// ```rust
    /// use storegate_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new("user-1", "agent");
    /// assert_eq!(ctx.role, "agent");
    /// ```
    pub fn new(user: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            role: role.into(),
        }
    }
}

impl From<AuthToken> for Ctx {
    fn from(token: AuthToken) -> Self {
        Self::new(token.sub, token.role)
    }
}
