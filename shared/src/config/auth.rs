//! Authentication configuration: token signing and cookie transport

use serde::{Deserialize, Serialize};

/// Secret used when nothing is configured. Refused in production.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Longest accepted `ACCESS_TOKEN_EXPIRE_MINUTES` (one year)
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 365 * 24 * 60;

/// Longest accepted `REFRESH_TOKEN_EXPIRE_DAYS` (ten years)
pub const MAX_REFRESH_TOKEN_EXPIRE_DAYS: i64 = 3650;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign and verify every token
    pub secret: String,

    /// Algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            algorithm: default_algorithm(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Attributes applied to the `access_token` and `refresh_token` cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie domain, e.g. ".trydelete.app". None scopes cookies to the API host
    #[serde(default)]
    pub domain: Option<String>,

    /// Send cookies over HTTPS only
    #[serde(default)]
    pub secure: bool,

    /// SameSite attribute: "lax", "strict" or "none"
    #[serde(default = "default_same_site")]
    pub same_site: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: None,
            secure: false,
            same_site: default_same_site(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_same_site() -> String {
    String::from("lax")
}
