use actix_web::{web, HttpResponse};

use dl_core::repositories::UserRepository;
use dl_shared::HealthResponse;

use crate::app::AppState;

/// Handler for GET /v1/health
pub async fn health_check<U>(state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    HttpResponse::Ok().json(HealthResponse::ok(state.version.clone()))
}
