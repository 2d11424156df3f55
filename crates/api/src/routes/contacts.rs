//! Route definitions for the `/contacts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// GET  /         -> list contacts
/// POST /import   -> bulk import
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::list_contacts))
        .route("/import", post(contacts::import_contacts))
}
