use actix_web::{web, HttpResponse};
use validator::Validate;

use dl_core::domain::value_objects::UserProfile;
use dl_core::repositories::UserRepository;

use crate::app::AppState;
use crate::dto::auth::SignupRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /v1/auth/signup
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "secret",
///     "name": "Optional Name"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The new user's profile (`id`, `email`, `name`, `is_active`, `created_at`).
///
/// ## Errors
/// - 400 Bad Request: Email already registered
/// - 422 Unprocessable Entity: Invalid request body
pub async fn signup<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let SignupRequest {
        email,
        password,
        name,
    } = request.into_inner();

    match state.auth_service.signup(&email, &password, name).await {
        Ok(user) => HttpResponse::Created().json(UserProfile::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
