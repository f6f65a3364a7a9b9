//! Domain-specific error types and error handling.
//!
//! Authentication and token failures are closed enums so that callers must
//! handle each outcome explicitly. The presentation layer maps them to HTTP
//! status codes.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// No token in either the cookie or the Authorization header
    #[error("Not authenticated")]
    Missing,

    /// Token subject no longer maps to an active user
    #[error("User not found or inactive")]
    UserUnavailable,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed token or missing subject
    #[error("Invalid token")]
    Invalid,

    #[error("Token expired")]
    Expired,

    /// Access token presented where a refresh token is expected, or vice versa
    #[error("Invalid token type")]
    WrongType,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;
