//! Shared helpers for API integration tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sendloop_api::auth::jwt::{generate_access_token, JwtConfig};
use sendloop_api::auth::password::hash_password;
use sendloop_api::config::ServerConfig;
use sendloop_api::router::build_app_router;
use sendloop_api::state::AppState;
use sendloop_core::token::TokenCodec;
use sendloop_dispatch::Dispatcher;
use sendloop_mailer::{MailProvider, MailerError};
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "test_password_123!";
pub const VERIFIED_SENDER: &str = "news@test.com";
pub const TOKEN_SECRET: &str = "test-unsubscribe-secret";

/// In-memory mail provider: records every send, optionally rejects
/// configured recipients.
pub struct StubMailer {
    pub verified: Vec<String>,
    pub reject: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
    pub last_html: Mutex<Option<String>>,
}

impl StubMailer {
    pub fn new() -> Self {
        Self {
            verified: vec![VERIFIED_SENDER.to_string()],
            reject: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            last_html: Mutex::new(None),
        }
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailProvider for StubMailer {
    async fn send(
        &self,
        _sender: &str,
        recipient: &str,
        _subject: &str,
        html: &str,
    ) -> Result<String, MailerError> {
        self.calls.lock().unwrap().push(recipient.to_string());
        *self.last_html.lock().unwrap() = Some(html.to_string());
        if self.reject.contains(recipient) {
            return Err(MailerError::Rejected(format!("rejected {recipient}")));
        }
        Ok(format!("stub-msg-{recipient}"))
    }

    async fn verified_senders(&self) -> Result<Vec<String>, MailerError> {
        Ok(self.verified.clone())
    }
}

/// Build a test `ServerConfig` with safe defaults and a known admin
/// credential pair.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        base_url: "http://localhost:8000".to_string(),
        send_delay_ms: 0,
        unsubscribe_secret: TOKEN_SECRET.to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with the production middleware stack,
/// a stub mail provider, and a zero inter-send delay.
pub fn build_test_app(pool: PgPool, mailer: Arc<StubMailer>) -> Router {
    let config = test_config();
    let codec = TokenCodec::new(TOKEN_SECRET);
    let provider: Arc<dyn MailProvider> = mailer;

    let dispatcher = Arc::new(Dispatcher::new(
        pool.clone(),
        Arc::clone(&provider),
        codec.clone(),
        config.base_url.clone(),
        Duration::ZERO,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: provider,
        dispatcher,
        codec,
    };

    build_app_router(state, &config)
}

/// Mint a valid admin bearer token for authenticated requests.
pub fn admin_token() -> String {
    let config = test_config();
    generate_access_token(ADMIN_EMAIL, &config.jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
