//! Authentication service module
//!
//! This module provides the password-based authentication flow:
//! - User registration and login
//! - Token refresh
//! - Access token verification and current-user lookup
//! - Password hashing, email normalization and bearer-token extraction helpers

mod config;
mod credentials;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use credentials::{extract_bearer_token, normalize_email, BEARER_SCHEME};
pub use password::{hash_password, hash_password_with_cost, verify_password};
pub use service::AuthService;
