//! Authentication route handlers
//!
//! - Signup and password login
//! - Token refresh (cookie or body)
//! - Logout (cookie removal)

pub mod login;
pub mod logout;
pub mod refresh;
pub mod signup;
