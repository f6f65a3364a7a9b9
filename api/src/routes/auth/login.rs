use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use dl_core::repositories::UserRepository;

use crate::app::AppState;
use crate::cookies::set_auth_cookies;
use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /v1/auth/login
///
/// Tokens are returned both in the body and as HttpOnly cookies.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid email or password
/// - 403 Forbidden: Account is disabled
pub async fn login<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password, Utc::now())
        .await
    {
        Ok(tokens) => {
            let mut response = HttpResponse::Ok();
            set_auth_cookies(&mut response, &tokens, &state.cookies);
            response.json(TokenResponse::from(tokens))
        }
        Err(error) => handle_domain_error(&error),
    }
}
