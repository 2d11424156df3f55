//! Route definitions for the `/t` tracking callbacks.

use axum::routing::get;
use axum::Router;

use crate::handlers::tracking;
use crate::state::AppState;

/// Routes mounted at `/t`.
///
/// ```text
/// GET /open   -> tracking pixel
/// GET /click  -> click redirect
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/open", get(tracking::track_open))
        .route("/click", get(tracking::track_click))
}
