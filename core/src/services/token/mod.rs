//! Token service module for JWT management
//!
//! Issues signed access and refresh tokens and verifies presented tokens,
//! enforcing token-type separation and expiry. Tokens are self-contained;
//! nothing is persisted server-side.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
