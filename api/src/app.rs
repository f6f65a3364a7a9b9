//! Application state and factory
//!
//! This module holds the shared application state and builds the
//! Actix-web application used by both the binary and the tests.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::{error::InternalError, web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use dl_core::errors::DomainError;
use dl_core::repositories::UserRepository;
use dl_core::services::auth::AuthService;
use dl_core::services::token::{TokenService, TokenServiceConfig};
use dl_shared::config::{CookieConfig, CorsConfig, JwtConfig};
use dl_shared::{error_codes, ErrorResponse};

use crate::cookies::CookieSettings;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, health, users};

/// Application state that holds shared services
pub struct AppState<U>
where
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub token_service: Arc<TokenService>,
    pub cookies: CookieSettings,
    pub cors: CorsConfig,
    pub version: String,
}

impl<U> AppState<U>
where
    U: UserRepository,
{
    /// Builds the state; cookie lifetimes follow the token service TTLs
    pub fn new(
        auth_service: Arc<AuthService<U>>,
        cookie_config: &CookieConfig,
        cors: CorsConfig,
        version: impl Into<String>,
    ) -> Self {
        let token_service = Arc::clone(auth_service.token_service());
        let cookies = CookieSettings::new(
            cookie_config,
            token_service.access_token_ttl().num_seconds(),
            token_service.refresh_token_ttl().num_seconds(),
        );
        Self {
            auth_service,
            token_service,
            cookies,
            cors,
            version: version.into(),
        }
    }
}

/// Builds the token service from the JWT section of the configuration
pub fn build_token_service(jwt: &JwtConfig) -> Result<TokenService, DomainError> {
    let algorithm = jsonwebtoken::Algorithm::from_str(&jwt.algorithm.to_uppercase()).map_err(|_| {
        DomainError::Validation {
            message: format!("Unsupported JWT algorithm: {}", jwt.algorithm),
        }
    })?;

    TokenService::new(TokenServiceConfig {
        jwt_secret: jwt.secret.clone(),
        algorithm,
        access_token_expiry_minutes: jwt.access_token_expire_minutes,
        refresh_token_expiry_days: jwt.refresh_token_expire_days,
    })
}

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let cors = create_cors(&app_state.cors);
    let token_service = web::Data::from(app_state.token_service.clone());

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(token_service)
        .app_data(json_config())
        // The last wrap is outermost, so every request is traced, preflights included
        .wrap(cors)
        .wrap(TracingLogger::default())
        .service(
            web::scope("/v1")
                .route("/health", web::get().to(health::health_check::<U>))
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup::signup::<U>))
                        .route("/login", web::post().to(auth::login::login::<U>))
                        .route("/refresh", web::post().to(auth::refresh::refresh::<U>))
                        .route("/logout", web::post().to(auth::logout::logout::<U>)),
                )
                .service(
                    web::scope("/users").service(
                        web::resource("/me")
                            .route(web::get().to(users::me::me::<U>))
                            .wrap(JwtAuth::new()),
                    ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Malformed or mistyped JSON bodies are reported as 422
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            err.to_string(),
        ));
        InternalError::from_response(err, response).into()
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
