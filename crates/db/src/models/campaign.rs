//! Campaign entity model and create DTO.

use sendloop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table. Immutable once created; the dispatch
/// engine only ever reads campaign content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub subject: String,
    pub sender: String,
    pub html: String,
    pub created_at: Timestamp,
}

/// Listing row without the (potentially large) HTML body.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignSummary {
    pub id: DbId,
    pub subject: String,
    pub sender: String,
    pub created_at: Timestamp,
}

/// Payload for campaign creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub subject: String,
    pub sender: String,
    pub html: String,
}
