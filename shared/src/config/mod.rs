//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and cookie transport
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `settings` - Flat settings loaded from file and process environment
//!
//! `AppConfig` is built once at startup and shared read-only afterwards.

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod settings;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{
    AuthConfig, CookieConfig, JwtConfig, DEFAULT_JWT_SECRET, MAX_ACCESS_TOKEN_EXPIRE_MINUTES,
    MAX_REFRESH_TOKEN_EXPIRE_DAYS,
};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use settings::Settings;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Application name reported by the health endpoint and logs
    pub app_name: String,

    /// Debug flag; lowers the default log level to `debug`
    #[serde(default)]
    pub debug: bool,

    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            app_name: String::from("Delete API"),
            debug: false,
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

impl AppConfig {
    /// Load configuration for the environment named by `ENVIRONMENT`
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let settings = Settings::load(environment)?;
        Self::from_settings(environment, settings)
    }

    /// Group flat settings into the typed configuration and validate it
    pub fn from_settings(environment: Environment, settings: Settings) -> Result<Self, ConfigError> {
        let mut logging = LoggingConfig::for_environment(environment);
        if settings.debug {
            logging.level = String::from("debug");
        }
        if let Some(level) = settings.log_level {
            logging.level = level;
        }
        if let Some(format) = settings.log_format {
            logging.format = format;
        }

        let config = Self {
            app_name: settings.app_name,
            debug: settings.debug,
            environment,
            server: ServerConfig {
                host: settings.host,
                port: settings.port,
                workers: settings.workers,
            },
            database: DatabaseConfig {
                url: settings.database_url,
                max_connections: settings.database_max_connections,
                connect_timeout: settings.database_connect_timeout,
            },
            auth: AuthConfig {
                jwt: JwtConfig {
                    secret: settings.secret_key,
                    algorithm: settings.algorithm,
                    access_token_expire_minutes: settings.access_token_expire_minutes,
                    refresh_token_expire_days: settings.refresh_token_expire_days,
                },
                cookie: CookieConfig {
                    domain: settings.cookie_domain.filter(|d| !d.trim().is_empty()),
                    secure: settings.cookie_secure,
                    same_site: settings.cookie_samesite.to_lowercase(),
                },
            },
            cors: CorsConfig::from_origins(settings.cors_origins),
            logging,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "SECRET_KEY must be set in production".to_string(),
            ));
        }
        if self.auth.jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("SECRET_KEY must not be empty".to_string()));
        }
        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&self.auth.jwt.access_token_expire_minutes) {
            return Err(ConfigError::Invalid(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {}",
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_EXPIRE_DAYS).contains(&self.auth.jwt.refresh_token_expire_days) {
            return Err(ConfigError::Invalid(format!(
                "REFRESH_TOKEN_EXPIRE_DAYS must be between 1 and {}",
                MAX_REFRESH_TOKEN_EXPIRE_DAYS
            )));
        }
        if !matches!(self.auth.cookie.same_site.as_str(), "lax" | "strict" | "none") {
            return Err(ConfigError::Invalid(format!(
                "COOKIE_SAMESITE must be lax, strict or none (got {})",
                self.auth.cookie.same_site
            )));
        }
        Ok(())
    }
}
