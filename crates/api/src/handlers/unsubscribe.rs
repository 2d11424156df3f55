//! Public self-service unsubscribe.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use sendloop_core::types::DbId;
use sendloop_db::repositories::{CampaignRepo, ContactRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// How many recent campaigns the legacy fallback scans when the link does
/// not carry a campaign id. Tokens are bound to a campaign, but old links
/// only carried the token itself.
const CAMPAIGN_LOOKBACK: i64 = 100;

const CONFIRMATION_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Unsubscribed</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; padding: 50px; }
        .container { max-width: 500px; margin: 0 auto; }
        h1 { color: #333; }
        p { color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Successfully Unsubscribed</h1>
        <p>You have been unsubscribed from our mailing list.</p>
        <p>You will no longer receive emails from us.</p>
    </div>
</body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct UnsubscribeParams {
    pub email: String,
    pub campaign_id: Option<DbId>,
}

/// GET /unsubscribe/{token}
///
/// Token-verified self-service unsubscribe; no login required. Links minted
/// by the instrumenter carry the issuing campaign id so the token can be
/// verified directly; links without it fall back to checking the most
/// recent campaigns.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<UnsubscribeParams>,
) -> AppResult<Html<&'static str>> {
    let contact = ContactRepo::get(&state.pool, &params.email).await?;
    if contact.is_none() {
        return Err(AppError::NotFound("Contact not found".into()));
    }

    let valid = match params.campaign_id {
        Some(campaign_id) => state.codec.verify(&token, &params.email, campaign_id),
        None => {
            let mut found = false;
            for campaign_id in CampaignRepo::recent_ids(&state.pool, CAMPAIGN_LOOKBACK).await? {
                if state.codec.verify(&token, &params.email, campaign_id) {
                    found = true;
                    break;
                }
            }
            found
        }
    };

    if !valid {
        // Forged or stale token: reject without mutating anything.
        return Err(AppError::BadRequest("Invalid unsubscribe token".into()));
    }

    ContactRepo::set_unsubscribed(&state.pool, &params.email).await?;
    tracing::info!(email = %params.email, "Contact unsubscribed via token link");

    Ok(Html(CONFIRMATION_PAGE))
}
