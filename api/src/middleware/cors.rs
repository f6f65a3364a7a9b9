//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients send the token cookies cross-origin, so credentials are
//! allowed and origins must be listed explicitly.

use actix_cors::Cors;
use actix_web::http::Uri;

use dl_shared::config::CorsConfig;

/// Creates the CORS middleware for the configured origins
///
/// `*` allows any origin. Entries that are not valid URIs are skipped with a
/// warning rather than failing application start-up.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else if origin.parse::<Uri>().is_ok() {
            cors = cors.allowed_origin(origin);
        } else {
            tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
        }
    }

    cors
}
