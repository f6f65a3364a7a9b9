//! HTTP layer for the Delete backend.
//!
//! Exposed as a library so integration tests can build the same `App` the
//! binary serves.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{build_token_service, create_app, AppState};
