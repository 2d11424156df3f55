//! Route definitions for health checks.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Liveness probe mounted at the root, NOT under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health))
}

/// Provider health, mounted at `/api/v1/health`.
pub fn provider_router() -> Router<AppState> {
    Router::new().route("/provider", get(health::provider_health))
}
