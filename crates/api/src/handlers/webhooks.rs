//! Provider delivery-notification webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use sendloop_dispatch::{parse_notification, EventIngestor};
use serde_json::json;

use crate::state::AppState;

/// POST /api/v1/webhooks/delivery
///
/// Ingest bounce and complaint notifications. The provider retries on
/// non-success responses, so this endpoint acknowledges every payload:
/// bodies that are not JSON or not a recognized shape are logged and
/// dropped, and per-recipient storage failures are counted but never
/// surfaced. The body is read raw rather than through the `Json` extractor
/// so a malformed payload cannot produce a 400.
pub async fn delivery(State(state): State<AppState>, body: Bytes) -> Json<serde_json::Value> {
    match serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .as_ref()
        .and_then(parse_notification)
    {
        Some(notification) => {
            let summary = EventIngestor::process(&state.pool, notification).await;
            tracing::info!(
                processed = summary.processed,
                failed = summary.failed,
                "Delivery notification ingested"
            );
        }
        None => {
            tracing::debug!("Ignoring unrecognized webhook payload");
        }
    }

    Json(json!({ "status": "success" }))
}
