use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use dl_api::{build_token_service, create_app, telemetry, AppState};
use dl_core::services::auth::{AuthService, AuthServiceConfig};
use dl_infra::{DatabasePool, PgUserRepository};
use dl_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging).context("failed to initialize tracing")?;

    tracing::info!(
        app = %config.app_name,
        environment = %config.environment,
        debug = config.debug,
        "Starting API server"
    );
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("SECRET_KEY is not set; using the development default");
    }

    // Database
    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if !database.health_check().await.context("database health check failed")? {
        anyhow::bail!("database health check returned an unexpected value");
    }
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;

    // Services
    let user_repository = Arc::new(PgUserRepository::new(database.get_pool().clone()));
    let token_service = Arc::new(build_token_service(&config.auth.jwt)?);
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        AuthServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState::new(
        auth_service,
        &config.auth.cookie,
        config.cors.clone(),
        env!("CARGO_PKG_VERSION"),
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Listening");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    database.close().await;
    Ok(())
}
