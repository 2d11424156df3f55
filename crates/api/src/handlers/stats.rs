//! Dashboard and per-campaign rollups.

use axum::extract::{Path, State};
use axum::Json;
use sendloop_core::error::CoreError;
use sendloop_core::types::DbId;
use sendloop_db::repositories::stats_repo::{CampaignStats, DashboardStats};
use sendloop_db::repositories::StatsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats/dashboard
///
/// Aggregate counters across campaigns, contacts, sends, and events.
pub async fn dashboard(
    _admin: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = StatsRepo::dashboard(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/stats/campaigns/{id}
///
/// Counters for one campaign; 404 for an unknown id.
pub async fn campaign(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CampaignStats>>> {
    let stats = StatsRepo::campaign(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    Ok(Json(DataResponse { data: stats }))
}
