//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{
    extract_bearer_token, hash_password, hash_password_with_cost, verify_password, AuthService,
    AuthServiceConfig,
};
pub use token::{TokenService, TokenServiceConfig};
