//! Route definitions for the `/stats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET /dashboard       -> aggregate counters
/// GET /campaigns/{id}  -> one campaign's counters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(stats::dashboard))
        .route("/campaigns/{id}", get(stats::campaign))
}
