use actix_web::{
    http::header::{self, HeaderValue},
    HttpResponse, HttpResponseBuilder,
};
use validator::ValidationErrors;

use dl_core::errors::{AuthError, DomainError, TokenError};
use dl_shared::{error_codes, ErrorResponse};

/// Message shared by every "not authenticated" rejection
pub const CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

fn unauthorized() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Unauthorized();
    builder.insert_header((header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")));
    builder
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Token failures and a missing token are not told apart.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => unauthorized().json(ErrorResponse::new(
                error_codes::INVALID_CREDENTIALS,
                auth_error.to_string(),
            )),
            AuthError::AccountDisabled => HttpResponse::Forbidden().json(ErrorResponse::new(
                error_codes::ACCOUNT_DISABLED,
                auth_error.to_string(),
            )),
            AuthError::EmailAlreadyRegistered => HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::EMAIL_ALREADY_REGISTERED, auth_error.to_string()),
            ),
            AuthError::Missing => unauthorized().json(ErrorResponse::new(
                error_codes::UNAUTHORIZED,
                CREDENTIALS_MESSAGE,
            )),
            AuthError::UserUnavailable => unauthorized().json(ErrorResponse::new(
                error_codes::UNAUTHORIZED,
                auth_error.to_string(),
            )),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::Invalid | TokenError::Expired | TokenError::WrongType => {
                tracing::debug!(reason = %token_error, "Token rejected");
                unauthorized().json(ErrorResponse::new(
                    error_codes::UNAUTHORIZED,
                    CREDENTIALS_MESSAGE,
                ))
            }
            TokenError::GenerationFailed(_) => internal_error(error),
        },
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::BAD_REQUEST, message.clone())),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::Database { .. } | DomainError::Internal { .. } => internal_error(error),
    }
}

fn internal_error(error: &DomainError) -> HttpResponse {
    tracing::error!(error = %error, "Request failed with an internal error");
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

/// 422 response listing the failed validation codes per field
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }
    HttpResponse::UnprocessableEntity().json(response)
}
