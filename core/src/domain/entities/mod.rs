//! Domain entities representing core business objects.

pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{
    Claims, TokenPair, TokenType, ACCESS_TOKEN_EXPIRY_MINUTES, BEARER_TOKEN_TYPE,
    MAX_ACCESS_TOKEN_EXPIRY_MINUTES, MAX_REFRESH_TOKEN_EXPIRY_DAYS, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::User;
