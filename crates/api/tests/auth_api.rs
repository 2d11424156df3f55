//! HTTP-level integration tests for admin authentication.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, StubMailer};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));

    let body = serde_json::json!({
        "email": common::ADMIN_EMAIL,
        "password": common::ADMIN_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain a token");
    assert_eq!(json["token_type"], "bearer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));

    let body = serde_json::json!({
        "email": common::ADMIN_EMAIL,
        "password": "incorrect_password",
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));

    let body = serde_json::json!({
        "email": "ghost@test.com",
        "password": common::ADMIN_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn issued_token_passes_verify(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Arc::new(StubMailer::new()));

    let body = serde_json::json!({
        "email": common::ADMIN_EMAIL,
        "password": common::ADMIN_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    let token = body_json(response).await["token"]
        .as_str()
        .expect("token should be a string")
        .to_string();

    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));
    let response = get_auth(app, "/api/v1/auth/verify", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["email"], common::ADMIN_EMAIL);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_without_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));

    let response = get(app, "/api/v1/auth/verify").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_reject_garbage_tokens(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));

    let response = get_auth(app, "/api/v1/contacts", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
