//! Repository for the `campaigns` table.

use sendloop_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CampaignSummary};

/// Column list for `campaigns` queries.
const COLUMNS: &str = "id, subject, sender, html, created_at";

/// Provides read/write operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the generated id.
    pub async fn create(
        pool: &PgPool,
        subject: &str,
        sender: &str,
        html: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO campaigns (subject, sender, html) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(subject)
        .bind(sender)
        .bind(html)
        .fetch_one(pool)
        .await
    }

    /// Fetch a campaign by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns newest-first, without the HTML body.
    pub async fn list(pool: &PgPool) -> Result<Vec<CampaignSummary>, sqlx::Error> {
        sqlx::query_as::<_, CampaignSummary>(
            "SELECT id, subject, sender, created_at FROM campaigns ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Ids of the most recent campaigns, newest-first.
    ///
    /// Used by the unsubscribe fallback that has a token but no campaign id
    /// and must verify against a bounded lookback window.
    pub async fn recent_ids(pool: &PgPool, limit: i64) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM campaigns ORDER BY id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
