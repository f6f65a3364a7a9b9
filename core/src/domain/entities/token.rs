//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default access token lifetime (30 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Default refresh token lifetime (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Longest accepted access token lifetime (one year)
pub const MAX_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 365 * 24 * 60;

/// Longest accepted refresh token lifetime (ten years)
pub const MAX_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 3650;

/// `token_type` reported alongside issued tokens
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Kind of credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token authorizing API requests
    Access,
    /// Long-lived token used only to obtain new access tokens
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// The wire shape is `{"sub", "exp", "type"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID). Empty when the token carried no subject
    #[serde(default)]
    pub sub: String,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Token type
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    /// Creates claims for `subject` expiring at `expires_at`
    pub fn new(subject: impl Into<String>, token_type: TokenType, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.into(),
            exp: expires_at.timestamp(),
            token_type,
        }
    }

    /// Whether the claims are expired at `now` (`exp <= now`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always "bearer"
    pub token_type: String,
}

impl TokenPair {
    /// Creates a new bearer token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}
