//! Common response payloads

pub mod response;

pub use response::{HealthResponse, MessageResponse};
