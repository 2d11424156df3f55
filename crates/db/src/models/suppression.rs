//! Suppression-ledger entity model.

use sendloop_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `suppressions` table.
///
/// Presence of a row for an email is a standing veto on all future sends,
/// regardless of the contact's `unsubscribed` flag. `bounce_type` is set for
/// bounce suppressions only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Suppression {
    pub email: String,
    pub reason: String,
    pub bounce_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
