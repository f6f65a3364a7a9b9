use actix_web::{web, HttpResponse};

use dl_core::repositories::UserRepository;
use dl_shared::MessageResponse;

use crate::app::AppState;
use crate::cookies::clear_auth_cookies;

/// Handler for POST /v1/auth/logout
///
/// Removes both token cookies. Issued tokens stay valid until they expire.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
pub async fn logout<U>(state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let mut response = HttpResponse::Ok();
    clear_auth_cookies(&mut response, &state.cookies);
    response.json(MessageResponse::new("Logged out successfully"))
}
