//! Shared configuration and response types for the Delete server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the startup configuration loader
//! - Error response structure returned by every endpoint
//! - Common response payloads

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CookieConfig, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LogFormat, LoggingConfig, ServerConfig, Settings,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, MessageResponse};
