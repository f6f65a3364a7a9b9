//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use dl_api::AppState;
use dl_core::repositories::MockUserRepository;
use dl_core::services::auth::{AuthService, AuthServiceConfig};
use dl_core::services::token::{TokenService, TokenServiceConfig};
use dl_shared::config::{CookieConfig, CorsConfig};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub struct TestContext {
    pub state: web::Data<AppState<MockUserRepository>>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<TokenService>,
}

pub fn test_context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new(TEST_SECRET)).unwrap());
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        tokens.clone(),
        AuthServiceConfig::default().with_bcrypt_cost(4),
    ));

    let state = web::Data::new(AppState::new(
        auth_service,
        &CookieConfig::default(),
        CorsConfig::from_origins([TEST_ORIGIN]),
        "test",
    ));

    TestContext {
        state,
        users,
        tokens,
    }
}
