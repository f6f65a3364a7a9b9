//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository pattern implementations
//! - Embedded schema migrations

pub mod connection;
pub mod postgres;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::PgUserRepository;
