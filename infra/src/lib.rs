//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `dl_core`:
//!
//! - **Database**: PostgreSQL connection pool and embedded migrations (SQLx)
//! - **Repositories**: `PgUserRepository` implementing `UserRepository`

pub mod database;

pub use database::{DatabasePool, PgUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
