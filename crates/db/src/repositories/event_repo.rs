//! Repository for the append-only `events` table.

use sendloop_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::event::Event;

/// Column list for `events` queries.
const COLUMNS: &str = "id, campaign_id, contact_email, event_type, metadata, created_at";

/// Provides insert/read operations for events. Rows are never updated or
/// deleted.
pub struct EventRepo;

impl EventRepo {
    /// Append an event row, returning the generated id.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        campaign_id: Option<DbId>,
        contact_email: &str,
        event_type: &str,
        metadata: Option<&serde_json::Value>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events (campaign_id, contact_email, event_type, metadata) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(campaign_id)
        .bind(contact_email)
        .bind(event_type)
        .bind(metadata)
        .fetch_one(executor)
        .await
    }

    /// List events for a recipient, newest-first.
    pub async fn list_for_contact(
        pool: &PgPool,
        contact_email: &str,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE contact_email = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(contact_email)
            .fetch_all(pool)
            .await
    }
}
