//! Route definitions for the `/campaigns` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::campaigns;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET  /            -> list campaigns
/// POST /            -> create campaign
/// POST /{id}/test   -> single test send
/// POST /{id}/send   -> full dispatch run
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route("/{id}/test", post(campaigns::send_test))
        .route("/{id}/send", post(campaigns::send_campaign))
}
