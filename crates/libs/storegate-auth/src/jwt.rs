//! JWT signing and verification.
//!
//! Tokens are signed with HS256 using a shared secret. Unlike an
//! unconditional decode, [`jwt_decode`] verifies the signature, the algorithm,
//! the issuer and the `exp`/`nbf` window before any claim is handed back.
//!
//! # Examples
//!
//! ```rust
//! use storegate_auth::jwt::{Keys, jwt_encode, jwt_decode};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
//! struct Claims {
//!     sub: String,
//!     iss: String,
//!     exp: i64,
//!     nbf: i64,
//! }
//!
//! let keys = Keys::new(b"MySuperSecret").unwrap();
//! let claims = Claims {
//!     sub: "admin".to_string(),
//!     iss: storegate_auth::ISS.to_string(),
//!     exp: 4118335200,
//!     nbf: 0,
//! };
//!
//! let token = jwt_encode(&keys, &claims).unwrap();
//! let decoded = jwt_decode::<Claims>(&keys, &token).unwrap();
//! assert_eq!(claims, decoded.claims);
//! ```

use std::fmt;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::ISS;
use crate::prelude::*;

/// Environment variable holding the signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair for JWT signing and verification.
///
/// Built once at start and shared by every request.
#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    /// Creates a key pair from a raw secret. An empty secret is refused.
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// Reads the secret from `JWT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(JWT_SECRET_ENV).map_err(|_| Error::MissingSecret)?;
        Self::new(secret.as_bytes())
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keys(REDACTED)")
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.set_issuer(&[ISS]);
    validation.set_required_spec_claims(&["exp", "nbf", "iss"]);
    validation.validate_nbf = true;
    validation
}

/// Creates a signed JWT from the provided claims.
///
/// Claims are signed, not encrypted.
pub fn jwt_encode<T>(keys: &Keys, body: &T) -> Result<String>
where
    T: Serialize,
{
    let header = Header::new(ALGORITHM);
    Ok(encode(&header, body, &keys.encoding)?)
}

/// Verifies a JWT and extracts its claims.
///
/// Rejects tokens with a bad signature, a different algorithm, a foreign
/// issuer, or an `exp`/`nbf` window that does not include now.
pub fn jwt_decode<T>(keys: &Keys, token: &str) -> Result<TokenData<T>>
where
    T: DeserializeOwned,
{
    Ok(decode(token, &keys.decoding, &validation())?)
}
