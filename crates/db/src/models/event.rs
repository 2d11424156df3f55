//! Delivery/engagement event entity model.

use sendloop_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `events` table.
///
/// `campaign_id` is null for events the provider reports without campaign
/// context (bounces and complaints arrive keyed by recipient only).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub campaign_id: Option<DbId>,
    pub contact_email: String,
    pub event_type: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}
