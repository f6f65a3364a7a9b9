//! Integration tests for the signup / login / refresh / logout / me flow

mod common;

use actix_web::{
    cookie::{time::Duration, Cookie},
    http::{header, StatusCode},
    test,
};
use chrono::Utc;
use dl_api::create_app;
use dl_core::domain::entities::TokenType;
use dl_core::repositories::UserRepository;
use serde_json::{json, Value};
use uuid::Uuid;

use common::test_context;

#[actix_web::test]
async fn test_health() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], "test");
}

#[actix_web::test]
async fn test_signup_then_duplicate() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/v1/auth/signup")
        .set_json(json!({"email": "u@x.com", "password": "pw1", "name": "U"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "u@x.com");
    assert_eq!(body["name"], "U");
    assert_eq!(body["is_active"], true);
    assert!(body.get("id").is_some());
    assert!(body.get("created_at").is_some());
    assert!(body.get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/v1/auth/signup")
        .set_json(json!({"email": "u@x.com", "password": "pw2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EMAIL_ALREADY_REGISTERED");
    assert_eq!(body["message"], "Email already registered");
}

#[actix_web::test]
async fn test_signup_rejects_invalid_body() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/v1/auth/signup")
        .set_json(json!({"email": "not-an-email", "password": "pw1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("email").is_some());

    let req = test::TestRequest::post()
        .uri("/v1/auth/signup")
        .insert_header(header::ContentType::json())
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(ctx.users.is_empty().await);
}

#[actix_web::test]
async fn test_empty_password_is_rejected() {
    let ctx = test_context();
    ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for uri in ["/v1/auth/signup", "/v1/auth/login"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({"email": "u@x.com", "password": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"].get("password").is_some());
    }
    assert_eq!(ctx.users.len().await, 1);
}

#[actix_web::test]
async fn test_login_sets_cookies_and_body() {
    let ctx = test_context();
    let user = ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/v1/auth/login")
        .set_json(json!({"email": "u@x.com", "password": "pw1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookies: Vec<Cookie<'static>> = resp
        .response()
        .cookies()
        .map(|c| c.into_owned())
        .collect();
    let access_cookie = cookies.iter().find(|c| c.name() == "access_token").unwrap();
    let refresh_cookie = cookies.iter().find(|c| c.name() == "refresh_token").unwrap();
    assert_eq!(access_cookie.http_only(), Some(true));
    assert_eq!(access_cookie.path(), Some("/"));
    assert_eq!(access_cookie.max_age(), Some(Duration::minutes(30)));
    assert_eq!(refresh_cookie.http_only(), Some(true));
    assert_eq!(refresh_cookie.max_age(), Some(Duration::days(7)));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");
    let access_token = body["access_token"].as_str().unwrap();
    assert!(!access_token.is_empty());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(access_cookie.value(), access_token);

    let subject = ctx
        .tokens
        .decode_and_verify(access_token, TokenType::Access, Utc::now())
        .unwrap();
    assert_eq!(subject, user.id.to_string());
}

#[actix_web::test]
async fn test_login_wrong_password_and_unknown_email() {
    let ctx = test_context();
    ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut messages = Vec::new();
    for (email, password) in [("u@x.com", "wrong"), ("ghost@x.com", "pw1")] {
        let req = test::TestRequest::post()
            .uri("/v1/auth/login")
            .set_json(json!({"email": email, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.response().cookies().next().is_none());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INVALID_CREDENTIALS");
        messages.push(body["message"].clone());
    }
    assert_eq!(messages[0], messages[1]);
}

#[actix_web::test]
async fn test_login_disabled_account() {
    let ctx = test_context();
    let mut user = ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    user.deactivate();
    ctx.users.update(user).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/v1/auth/login")
        .set_json(json!({"email": "u@x.com", "password": "pw1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Account is disabled");
}

#[actix_web::test]
async fn test_refresh_with_body_token() {
    let ctx = test_context();
    let user = ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let tokens = ctx.state.auth_service.login("u@x.com", "pw1", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/v1/auth/refresh")
        .set_json(json!({"refresh_token": tokens.refresh_token}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.response().cookies().count(), 2);

    let body: Value = test::read_body_json(resp).await;
    let subject = ctx
        .tokens
        .decode_and_verify(body["access_token"].as_str().unwrap(), TokenType::Access, Utc::now())
        .unwrap();
    assert_eq!(subject, user.id.to_string());
    assert_eq!(body["token_type"], "bearer");
}

#[actix_web::test]
async fn test_refresh_prefers_cookie() {
    let ctx = test_context();
    ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let tokens = ctx.state.auth_service.login("u@x.com", "pw1", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", tokens.refresh_token.clone()))
        .set_json(json!({"refresh_token": "garbage"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", tokens.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_rejections() {
    let ctx = test_context();
    let mut user = ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let tokens = ctx.state.auth_service.login("u@x.com", "pw1", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    // No token anywhere
    let req = test::TestRequest::post().uri("/v1/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Access token where a refresh token is expected
    let req = test::TestRequest::post()
        .uri("/v1/auth/refresh")
        .set_json(json!({"refresh_token": tokens.access_token}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Could not validate credentials");

    // Inactive user
    user.deactivate();
    ctx.users.update(user).await.unwrap();
    let req = test::TestRequest::post()
        .uri("/v1/auth/refresh")
        .set_json(json!({"refresh_token": tokens.refresh_token}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User not found or inactive");
}

#[actix_web::test]
async fn test_logout_clears_cookies() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookies: Vec<Cookie<'static>> = resp
        .response()
        .cookies()
        .map(|c| c.into_owned())
        .collect();
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.name() == "access_token" || cookie.name() == "refresh_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");
}

#[actix_web::test]
async fn test_me_with_bearer_and_cookie() {
    let ctx = test_context();
    let user = ctx.state.auth_service.signup("u@x.com", "pw1", None).await.unwrap();
    let tokens = ctx.state.auth_service.login("u@x.com", "pw1", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/v1/users/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], "u@x.com");

    let req = test::TestRequest::get()
        .uri("/v1/users/me")
        .cookie(Cookie::new("access_token", tokens.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_me_rejections() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/v1/users/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    let refresh = ctx
        .tokens
        .issue_refresh_token(&Uuid::new_v4().to_string(), Utc::now())
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/v1/users/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", refresh)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Valid token for a user that does not exist
    let orphan = ctx
        .tokens
        .issue_access_token(&Uuid::new_v4().to_string(), Utc::now())
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/v1/users/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", orphan)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn test_unknown_route() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/v1/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
