//! Password hashing backed by bcrypt.
//!
//! A fresh salt is generated on every call, so hashing the same password
//! twice yields different hashes. Verification uses bcrypt's own routine.

use crate::errors::DomainError;

/// Hashes `password` with bcrypt's default cost
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

/// Hashes `password` with an explicit bcrypt cost (4..=31)
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Checks `password` against a stored bcrypt hash
///
/// A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}
