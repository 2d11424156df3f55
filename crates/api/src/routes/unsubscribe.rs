//! Route definitions for the public unsubscribe page.

use axum::routing::get;
use axum::Router;

use crate::handlers::unsubscribe;
use crate::state::AppState;

/// Mounted at the root, NOT under `/api/v1`: the path is baked into sent
/// emails and must stay stable.
///
/// ```text
/// GET /unsubscribe/{token}?email=...&campaign_id=...  -> confirm page
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/unsubscribe/{token}", get(unsubscribe::unsubscribe))
}
