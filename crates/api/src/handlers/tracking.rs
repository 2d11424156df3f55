//! Open and click tracking callbacks.
//!
//! These are hit by the recipient's mail client or browser while rendering a
//! message, so they must never fail outward: a storage fault is logged and
//! the pixel or redirect is returned regardless.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use sendloop_core::types::DbId;
use sendloop_db::repositories::EventRepo;
use serde::Deserialize;

use crate::state::AppState;

/// 1x1 transparent GIF served as the open-tracking pixel.
const GIF_1X1: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

#[derive(Debug, Deserialize)]
pub struct OpenParams {
    pub campaign_id: DbId,
    pub email: String,
}

/// GET /api/v1/t/open
///
/// Record an open event and return the pixel. The pixel is returned even if
/// the insert fails.
pub async fn track_open(State(state): State<AppState>, Query(params): Query<OpenParams>) -> Response {
    if let Err(err) = EventRepo::insert(
        &state.pool,
        Some(params.campaign_id),
        &params.email,
        "open",
        None,
    )
    .await
    {
        tracing::warn!(campaign_id = params.campaign_id, email = %params.email, error = %err, "Failed to record open event");
    }

    ([(header::CONTENT_TYPE, "image/gif")], GIF_1X1).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ClickParams {
    pub campaign_id: DbId,
    pub email: String,
    pub url: String,
}

/// GET /api/v1/t/click
///
/// Record a click event and redirect to the original URL with 302 Found. A
/// failed insert must not block the redirect.
pub async fn track_click(
    State(state): State<AppState>,
    Query(params): Query<ClickParams>,
) -> Response {
    if let Err(err) = EventRepo::insert(
        &state.pool,
        Some(params.campaign_id),
        &params.email,
        "click",
        None,
    )
    .await
    {
        tracing::warn!(campaign_id = params.campaign_id, email = %params.email, error = %err, "Failed to record click event");
    }

    (
        StatusCode::FOUND,
        [(header::LOCATION, params.url)],
    )
        .into_response()
}
