//! Liveness and provider health checks.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /health
///
/// Liveness probe: confirms the process is up and the database answers.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    sendloop_db::health_check(&state.pool)
        .await
        .map_err(|e| AppError::InternalError(format!("Database unreachable: {e}")))?;

    Ok(Json(json!({ "status": "ok" })))
}

/// GET /api/v1/health/provider
///
/// Report the provider's verified sender list and the configured send rate
/// so an operator can sanity-check dispatch settings.
pub async fn provider_health(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let verified = state
        .mailer
        .verified_senders()
        .await
        .map_err(|e| AppError::InternalError(format!("Provider unreachable: {e}")))?;

    Ok(Json(json!({
        "status": "ok",
        "verified_senders": verified,
        "send_delay_ms": state.config.send_delay_ms,
    })))
}
