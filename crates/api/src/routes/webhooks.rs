//! Route definitions for the `/webhooks` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST /delivery  -> provider bounce/complaint notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/delivery", post(webhooks::delivery))
}
