//! HTTP-level integration tests for campaign creation and dispatch.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{admin_token, body_json, get_auth, post_json_auth, StubMailer, VERIFIED_SENDER};
use sendloop_db::repositories::{CampaignRepo, ContactRepo};
use sqlx::PgPool;

const HTML: &str = "<html><body><p>Hello</p></body></html>";

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_campaign_returns_id(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));
    let token = admin_token();

    let body = serde_json::json!({
        "subject": "March update",
        "sender": VERIFIED_SENDER,
        "html": HTML,
    });
    let response = post_json_auth(app, "/api/v1/campaigns", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number(), "response must carry the new id");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_campaign_rejects_blank_subject(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));
    let token = admin_token();

    let body = serde_json::json!({
        "subject": "   ",
        "sender": VERIFIED_SENDER,
        "html": HTML,
    });
    let response = post_json_auth(app, "/api/v1/campaigns", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_campaigns_newest_first_without_html(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Arc::new(StubMailer::new()));
    let token = admin_token();

    CampaignRepo::create(&pool, "First", VERIFIED_SENDER, HTML)
        .await
        .unwrap();
    CampaignRepo::create(&pool, "Second", VERIFIED_SENDER, HTML)
        .await
        .unwrap();

    let response = get_auth(app, "/api/v1/campaigns", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let campaigns = json["data"].as_array().expect("data should be an array");
    assert_eq!(campaigns.len(), 2);
    assert_eq!(campaigns[0]["subject"], "Second");
    assert_eq!(campaigns[1]["subject"], "First");
    assert!(campaigns[0].get("html").is_none(), "summaries omit the body");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn send_campaign_reports_outcome(pool: PgPool) {
    let mailer = Arc::new(StubMailer::new());
    let app = common::build_test_app(pool.clone(), Arc::clone(&mailer));
    let token = admin_token();

    let id = CampaignRepo::create(&pool, "Send me", VERIFIED_SENDER, HTML)
        .await
        .unwrap();
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();
    ContactRepo::insert_ignore(&pool, "b@x.com", None).await.unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/campaigns/{id}/send"),
        &token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sent"], 2);
    assert_eq!(json["failed"], 0);
    assert_eq!(json["total_eligible"], 2);
    assert_eq!(mailer.sent_to(), vec!["a@x.com", "b@x.com"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn send_with_unverified_sender_is_rejected(pool: PgPool) {
    let mailer = Arc::new(StubMailer::new());
    let app = common::build_test_app(pool.clone(), Arc::clone(&mailer));
    let token = admin_token();

    let id = CampaignRepo::create(&pool, "Bad sender", "stranger@x.com", HTML)
        .await
        .unwrap();
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/campaigns/{id}/send"),
        &token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SENDER_NOT_VERIFIED");
    assert!(mailer.sent_to().is_empty(), "no sends may be attempted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn send_to_missing_campaign_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));
    let token = admin_token();

    let response = post_json_auth(
        app,
        "/api/v1/campaigns/999/send",
        &token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_recipients_count_as_failed_and_are_not_retried(pool: PgPool) {
    let mut stub = StubMailer::new();
    stub.reject.insert("b@x.com".to_string());
    let mailer = Arc::new(stub);
    let app = common::build_test_app(pool.clone(), Arc::clone(&mailer));
    let token = admin_token();

    let id = CampaignRepo::create(&pool, "Partial", VERIFIED_SENDER, HTML)
        .await
        .unwrap();
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();
    ContactRepo::insert_ignore(&pool, "b@x.com", None).await.unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/campaigns/{id}/send"),
        &token,
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["sent"], 1);
    assert_eq!(json["failed"], 1);

    // A second run finds nothing left to do, including the failed recipient.
    let response = post_json_auth(
        app,
        &format!("/api/v1/campaigns/{id}/send"),
        &token,
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["sent"], 0);
    assert_eq!(json["failed"], 0);
    assert_eq!(json["total_eligible"], 0);
    assert_eq!(mailer.sent_to().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sent_payload_is_instrumented(pool: PgPool) {
    let mailer = Arc::new(StubMailer::new());
    let app = common::build_test_app(pool.clone(), Arc::clone(&mailer));
    let token = admin_token();

    let html = r#"<html><body><a href="https://example.com/sale">Sale</a></body></html>"#;
    let id = CampaignRepo::create(&pool, "Tracked", VERIFIED_SENDER, html)
        .await
        .unwrap();
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/campaigns/{id}/send"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let delivered = mailer.last_html.lock().unwrap().clone().unwrap();
    assert!(delivered.contains("/api/v1/t/open?"), "beacon must be present");
    assert!(delivered.contains("/api/v1/t/click?"), "links must be rewritten");
    assert!(delivered.contains("/unsubscribe/"), "footer must be present");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_hits_the_requested_address_only(pool: PgPool) {
    let mailer = Arc::new(StubMailer::new());
    let app = common::build_test_app(pool.clone(), Arc::clone(&mailer));
    let token = admin_token();

    let id = CampaignRepo::create(&pool, "Preview", VERIFIED_SENDER, HTML)
        .await
        .unwrap();
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();

    let body = serde_json::json!({ "test_email": "operator@test.com" });
    let response = post_json_auth(app, &format!("/api/v1/campaigns/{id}/test"), &token, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "sent");
    assert!(json["message_id"].is_string());
    assert_eq!(mailer.sent_to(), vec!["operator@test.com"]);
}
