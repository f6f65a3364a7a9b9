//! JWT authentication middleware for protecting API endpoints.
//!
//! The token is taken from the `access_token` cookie, or from an
//! `Authorization: Bearer` header when the cookie is absent. A verified
//! access token yields an `AuthContext` in the request extensions; anything
//! else is answered with a JSON 401 before the handler runs.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use dl_core::{
    domain::entities::TokenType,
    errors::{AuthError, DomainError, TokenError},
    services::{auth::extract_bearer_token, token::TokenService},
};

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::handlers::error::handle_domain_error;

/// User authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID taken from the token subject
    pub user_id: Uuid,
}

/// JWT authentication middleware factory
///
/// Requires a `web::Data<TokenService>` in the app data.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req.app_data::<web::Data<TokenService>>() {
            Some(token_service) => authenticate_request(&req, token_service, Utc::now()),
            None => Err(DomainError::Internal {
                message: "Token service is not configured".to_string(),
            }),
        };

        match outcome {
            Ok(context) => {
                // Inject auth context into request extensions
                req.extensions_mut().insert(context);
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                })
            }
            Err(error) => {
                let response = handle_domain_error(&error);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Resolves the access token presented with `req` to an `AuthContext`
pub fn authenticate_request(
    req: &ServiceRequest,
    token_service: &TokenService,
    now: DateTime<Utc>,
) -> Result<AuthContext, DomainError> {
    let cookie = req.cookie(ACCESS_TOKEN_COOKIE);
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = extract_bearer_token(cookie.as_ref().map(|c| c.value()), header)?;
    let subject = token_service.decode_and_verify(token, TokenType::Access, now)?;
    let user_id = Uuid::parse_str(&subject).map_err(|_| TokenError::Invalid)?;

    Ok(AuthContext { user_id })
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| {
                let error = DomainError::from(AuthError::Missing);
                let response = handle_domain_error(&error);
                InternalError::from_response(error, response).into()
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test};
    use dl_core::services::token::TokenServiceConfig;

    fn token_service() -> TokenService {
        TokenService::new(TokenServiceConfig::new("middleware-secret")).unwrap()
    }

    #[::core::prelude::v1::test]
    fn test_authenticate_from_header() {
        let service = token_service();
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let token = service.issue_access_token(&user_id.to_string(), now).unwrap();

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, format!("bearer {}", token)))
            .to_srv_request();

        assert_eq!(
            authenticate_request(&req, &service, now).unwrap().user_id,
            user_id
        );
    }

    #[::core::prelude::v1::test]
    fn test_cookie_wins_over_header() {
        let service = token_service();
        let cookie_user = Uuid::new_v4();
        let now = Utc::now();
        let cookie_token = service.issue_access_token(&cookie_user.to_string(), now).unwrap();

        let req = test::TestRequest::default()
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, cookie_token))
            .insert_header((AUTHORIZATION, "Bearer garbage"))
            .to_srv_request();

        assert_eq!(
            authenticate_request(&req, &service, now).unwrap().user_id,
            cookie_user
        );
    }

    #[::core::prelude::v1::test]
    fn test_missing_and_refresh_tokens_rejected() {
        let service = token_service();
        let now = Utc::now();

        let req = test::TestRequest::default().to_srv_request();
        assert!(matches!(
            authenticate_request(&req, &service, now),
            Err(DomainError::Auth(AuthError::Missing))
        ));

        let refresh = service.issue_refresh_token(&Uuid::new_v4().to_string(), now).unwrap();
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, format!("Bearer {}", refresh)))
            .to_srv_request();
        assert!(matches!(
            authenticate_request(&req, &service, now),
            Err(DomainError::Token(TokenError::WrongType))
        ));
    }
}
