//! Send-record entity model.

use sendloop_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `campaign_sends` table: one attempt for one
/// (campaign, recipient) pair.
///
/// `message_id` is the provider's identifier and is null when the attempt
/// failed before the provider accepted the message. Rows are written once by
/// the dispatch loop; only asynchronous bounce reconciliation may later fill
/// in `bounce_type`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignSend {
    pub id: DbId,
    pub campaign_id: DbId,
    pub contact_email: String,
    pub message_id: Option<String>,
    pub delivered: bool,
    pub bounce_type: Option<String>,
    pub created_at: Timestamp,
}
