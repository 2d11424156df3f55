//! Repository for the `campaign_sends` table.

use sendloop_core::bounce::BounceKind;
use sendloop_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::send::CampaignSend;

/// Column list for `campaign_sends` queries.
const COLUMNS: &str =
    "id, campaign_id, contact_email, message_id, delivered, bounce_type, created_at";

/// Provides read/write operations for send records.
///
/// Inserts use `ON CONFLICT DO NOTHING` against the unique
/// `(campaign_id, contact_email)` constraint, so a racing second writer is
/// ignored rather than erroring. That constraint is the at-most-once guard.
pub struct SendRepo;

impl SendRepo {
    /// Whether an attempt (successful or failed) is already recorded for
    /// this (campaign, recipient) pair.
    pub async fn exists(
        pool: &PgPool,
        campaign_id: DbId,
        contact_email: &str,
    ) -> Result<bool, sqlx::Error> {
        let id: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM campaign_sends WHERE campaign_id = $1 AND contact_email = $2",
        )
        .bind(campaign_id)
        .bind(contact_email)
        .fetch_optional(pool)
        .await?;
        Ok(id.is_some())
    }

    /// Record a successful provider send.
    ///
    /// Returns `true` if the row was inserted, `false` if a record for the
    /// pair already existed.
    pub async fn record_success(
        pool: &PgPool,
        campaign_id: DbId,
        contact_email: &str,
        message_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO campaign_sends (campaign_id, contact_email, message_id, delivered) \
             VALUES ($1, $2, $3, TRUE) \
             ON CONFLICT (campaign_id, contact_email) DO NOTHING",
        )
        .bind(campaign_id)
        .bind(contact_email)
        .bind(message_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a failed provider send so the recipient is never retried for
    /// this campaign. A failed attempt is terminal unless an operator clears
    /// the row manually.
    pub async fn record_failure(
        pool: &PgPool,
        campaign_id: DbId,
        contact_email: &str,
        bounce_kind: Option<BounceKind>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO campaign_sends (campaign_id, contact_email, delivered, bounce_type) \
             VALUES ($1, $2, FALSE, $3) \
             ON CONFLICT (campaign_id, contact_email) DO NOTHING",
        )
        .bind(campaign_id)
        .bind(contact_email)
        .bind(bounce_kind.map(BounceKind::as_str))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Backfill the bounce classification on the recipient's most recent
    /// send record when an asynchronous bounce notification arrives.
    pub async fn set_bounce_type(
        executor: impl PgExecutor<'_>,
        contact_email: &str,
        bounce_kind: BounceKind,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE campaign_sends SET bounce_type = $2 \
             WHERE id = ( \
                 SELECT id FROM campaign_sends \
                 WHERE contact_email = $1 ORDER BY id DESC LIMIT 1)",
        )
        .bind(contact_email)
        .bind(bounce_kind.as_str())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// List all send records for a campaign, oldest-first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignSend>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM campaign_sends WHERE campaign_id = $1 ORDER BY id");
        sqlx::query_as::<_, CampaignSend>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
