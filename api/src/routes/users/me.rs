use actix_web::{web, HttpResponse};

use dl_core::domain::value_objects::UserProfile;
use dl_core::repositories::UserRepository;

use crate::app::AppState;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /v1/users/me
///
/// Requires an access token (cookie or Bearer header).
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 404 Not Found: The user no longer exists
pub async fn me<U>(state: web::Data<AppState<U>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserProfile::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
