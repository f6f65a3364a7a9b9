//! Credential normalization and bearer token extraction.

use crate::errors::AuthError;

/// Authorization scheme accepted in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Canonical form of a login email
///
/// Surrounding whitespace is dropped and the domain part is lowercased. The
/// local part keeps its case.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Picks the token a client presented
///
/// A non-empty cookie value wins. Otherwise the `Authorization` header is
/// parsed as `Bearer <token>` with a case-insensitive scheme.
///
/// # Arguments
///
/// * `cookie_value` - Value of the token cookie, if any
/// * `authorization_header` - Raw `Authorization` header, if any
///
/// # Returns
///
/// * `Ok(&str)` - The token
/// * `Err(AuthError::Missing)` - Neither source carried a token
pub fn extract_bearer_token<'a>(
    cookie_value: Option<&'a str>,
    authorization_header: Option<&'a str>,
) -> Result<&'a str, AuthError> {
    if let Some(cookie) = cookie_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(cookie);
    }

    let header = authorization_header.ok_or(AuthError::Missing)?;
    let (scheme, token) = header.trim().split_once(' ').ok_or(AuthError::Missing)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::Missing);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}
