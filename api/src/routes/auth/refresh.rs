use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use chrono::Utc;

use dl_core::errors::{AuthError, DomainError};
use dl_core::repositories::UserRepository;

use crate::app::AppState;
use crate::cookies::{set_auth_cookies, REFRESH_TOKEN_COOKIE};
use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /v1/auth/refresh
///
/// The refresh token is read from the `refresh_token` cookie, or from the
/// JSON body when no cookie is present. A new access and refresh token pair
/// is returned and set as cookies.
///
/// # Errors
/// - 401 Unauthorized: Missing, invalid, expired or non-refresh token, or
///   the user no longer exists or is inactive
pub async fn refresh<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let token = match presented_refresh_token(&req, body) {
        Some(token) => token,
        None => return handle_domain_error(&DomainError::from(AuthError::Missing)),
    };

    match state.auth_service.refresh(&token, Utc::now()).await {
        Ok(tokens) => {
            let mut response = HttpResponse::Ok();
            set_auth_cookies(&mut response, &tokens, &state.cookies);
            response.json(TokenResponse::from(tokens))
        }
        Err(error) => handle_domain_error(&error),
    }
}

fn presented_refresh_token(
    req: &HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Option<String> {
    req.cookie(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| body.map(|json| json.into_inner().refresh_token))
        .filter(|token| !token.is_empty())
}
