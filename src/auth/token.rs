use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::User;

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// The public identity a token speaks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Represents the claims encoded within a JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Identity,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    /// Bad signature, wrong secret, malformed token or missing claims.
    Invalid,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token expired"),
            TokenError::Invalid => write!(f, "token invalid"),
        }
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies HS256 tokens with a single server-wide secret.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The 24h boundary is exact.
        validation.leeway = 0;
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            validation,
        }
    }

    /// Generates a token for `identity` valid for 24 hours from now.
    pub fn issue(&self, identity: Identity) -> Result<String, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Generates a token as if issued at `issued_at`.
    pub fn issue_at(&self, identity: Identity, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            identity,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?)
    }

    /// Checks signature and expiry and returns the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
