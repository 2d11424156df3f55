//! Campaign creation, listing, and dispatch.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sendloop_core::types::DbId;
use sendloop_db::models::campaign::CreateCampaign;
use sendloop_db::repositories::CampaignRepo;
use sendloop_dispatch::DispatchOutcome;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/campaigns
///
/// Create a campaign. The HTML body is stored verbatim; instrumentation
/// happens per recipient at send time.
pub async fn create_campaign(
    _admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    if input.subject.trim().is_empty() {
        return Err(AppError::BadRequest("subject must not be empty".into()));
    }
    if input.sender.trim().is_empty() {
        return Err(AppError::BadRequest("sender must not be empty".into()));
    }

    let id = CampaignRepo::create(
        &state.pool,
        input.subject.trim(),
        input.sender.trim(),
        &input.html,
    )
    .await?;

    tracing::info!(campaign_id = id, subject = %input.subject, "Campaign created");

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/v1/campaigns
///
/// List campaigns newest-first, without HTML bodies.
pub async fn list_campaigns(
    _admin: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let campaigns = CampaignRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

#[derive(Debug, Deserialize)]
pub struct TestSendRequest {
    pub test_email: String,
}

#[derive(Debug, Serialize)]
pub struct TestSendResponse {
    pub status: &'static str,
    pub message_id: String,
}

/// POST /api/v1/campaigns/{id}/test
///
/// Send a single operator-directed test email. Bypasses eligibility and
/// suppression by design and records no send row.
pub async fn send_test(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<TestSendRequest>,
) -> AppResult<Json<TestSendResponse>> {
    let message_id = state
        .dispatcher
        .send_test(campaign_id, &input.test_email)
        .await?;

    Ok(Json(TestSendResponse {
        status: "sent",
        message_id,
    }))
}

/// POST /api/v1/campaigns/{id}/send
///
/// Run the full dispatch loop for a campaign. Synchronous: the caller
/// blocks until every eligible recipient has been attempted. Safe to
/// re-invoke; already-attempted recipients are skipped.
pub async fn send_campaign(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DispatchOutcome>> {
    let outcome = state.dispatcher.send_campaign(campaign_id).await?;
    Ok(Json(outcome))
}
