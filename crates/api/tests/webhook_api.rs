//! HTTP-level integration tests for the delivery-notification webhook.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, post_json, StubMailer};
use sendloop_db::repositories::{ContactRepo, EventRepo, SuppressionRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn permanent_bounce_suppresses_and_unsubscribes(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Arc::new(StubMailer::new()));
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();

    let body = serde_json::json!({
        "notificationType": "Bounce",
        "bounce": {
            "bounceType": "Permanent",
            "bouncedRecipients": [{ "emailAddress": "a@x.com" }]
        }
    });
    let response = post_json(app, "/api/v1/webhooks/delivery", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "success");

    let suppression = SuppressionRepo::get(&pool, "a@x.com").await.unwrap().unwrap();
    assert_eq!(suppression.reason, "bounce");
    assert_eq!(suppression.bounce_type.as_deref(), Some("hard"));

    let contact = ContactRepo::get(&pool, "a@x.com").await.unwrap().unwrap();
    assert!(contact.unsubscribed);

    let events = EventRepo::list_for_contact(&pool, "a@x.com").await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "bounce");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transient_bounce_suppresses_without_unsubscribing(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Arc::new(StubMailer::new()));
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();

    let body = serde_json::json!({
        "notificationType": "Bounce",
        "bounce": {
            "bounceType": "Transient",
            "bouncedRecipients": [{ "emailAddress": "a@x.com" }]
        }
    });
    let response = post_json(app, "/api/v1/webhooks/delivery", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let suppression = SuppressionRepo::get(&pool, "a@x.com").await.unwrap().unwrap();
    assert_eq!(suppression.bounce_type.as_deref(), Some("soft"));

    let contact = ContactRepo::get(&pool, "a@x.com").await.unwrap().unwrap();
    assert!(!contact.unsubscribed, "soft bounces keep the subscription");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enveloped_complaint_is_processed(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Arc::new(StubMailer::new()));
    ContactRepo::insert_ignore(&pool, "a@x.com", None).await.unwrap();

    let inner = serde_json::json!({
        "notificationType": "Complaint",
        "complaint": {
            "complainedRecipients": [{ "emailAddress": "a@x.com" }]
        }
    });
    let body = serde_json::json!({
        "Type": "Notification",
        "Message": inner.to_string(),
    });
    let response = post_json(app, "/api/v1/webhooks/delivery", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let suppression = SuppressionRepo::get(&pool, "a@x.com").await.unwrap().unwrap();
    assert_eq!(suppression.reason, "complaint");

    let contact = ContactRepo::get(&pool, "a@x.com").await.unwrap().unwrap();
    assert!(contact.unsubscribed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unrecognized_payloads_are_acknowledged(pool: PgPool) {
    let app = common::build_test_app(pool.clone(), Arc::new(StubMailer::new()));

    for body in [
        serde_json::json!({ "Type": "SubscriptionConfirmation", "Message": "{}" }),
        serde_json::json!({ "notificationType": "Delivery" }),
        serde_json::json!({ "hello": "world" }),
    ] {
        let response = post_json(app.clone(), "/api/v1/webhooks/delivery", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "success");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_json_bodies_are_acknowledged(pool: PgPool) {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let app = common::build_test_app(pool, Arc::new(StubMailer::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/webhooks/delivery")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("definitely not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "success");
}
