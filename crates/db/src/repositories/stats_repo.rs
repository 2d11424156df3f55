//! Read-only dashboard rollups.
//!
//! These aggregate over data the dispatch engine and ingestor write; nothing
//! here mutates state.

use sendloop_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub campaigns: i64,
    pub contacts: i64,
    pub active_contacts: i64,
    pub sent: i64,
    pub delivered: i64,
    pub opens: i64,
    pub clicks: i64,
    pub open_rate: f64,
    pub click_rate: f64,
}

/// Aggregate counters for a single campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignStats {
    pub campaign_id: DbId,
    pub sent: i64,
    pub delivered: i64,
    pub opens: i64,
    pub clicks: i64,
    pub bounces: i64,
    pub open_rate: f64,
    pub click_rate: f64,
}

/// Provides the dashboard and per-campaign aggregation queries.
pub struct StatsRepo;

impl StatsRepo {
    /// Compute all dashboard counters.
    ///
    /// "Delivered" counts sends that succeeded or failed without a bounce
    /// classification; open/click rates are distinct recipients over the
    /// delivered count.
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let campaigns: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns")
            .fetch_one(pool)
            .await?;
        let contacts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(pool)
            .await?;
        let active_contacts: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE unsubscribed = FALSE")
                .fetch_one(pool)
                .await?;
        let sent: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaign_sends")
            .fetch_one(pool)
            .await?;
        let delivered: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM campaign_sends \
             WHERE delivered = TRUE OR (delivered = FALSE AND bounce_type IS NULL)",
        )
        .fetch_one(pool)
        .await?;
        let opens: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT contact_email) FROM events WHERE event_type = 'open'",
        )
        .fetch_one(pool)
        .await?;
        let clicks: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT contact_email) FROM events WHERE event_type = 'click'",
        )
        .fetch_one(pool)
        .await?;

        let rate = |n: i64| {
            if delivered > 0 {
                (n as f64 / delivered as f64 * 10_000.0).round() / 100.0
            } else {
                0.0
            }
        };

        Ok(DashboardStats {
            campaigns,
            contacts,
            active_contacts,
            sent,
            delivered,
            opens,
            clicks,
            open_rate: rate(opens),
            click_rate: rate(clicks),
        })
    }

    /// Compute the counters for one campaign, or `None` if it does not
    /// exist. Same delivered/rate semantics as the dashboard, scoped to the
    /// campaign, plus the bounce count.
    pub async fn campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Option<CampaignStats>, sqlx::Error> {
        let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM campaigns WHERE id = $1")
            .bind(campaign_id)
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let sent: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaign_sends WHERE campaign_id = $1")
                .bind(campaign_id)
                .fetch_one(pool)
                .await?;
        let delivered: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM campaign_sends WHERE campaign_id = $1 \
             AND (delivered = TRUE OR (delivered = FALSE AND bounce_type IS NULL))",
        )
        .bind(campaign_id)
        .fetch_one(pool)
        .await?;
        let opens: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT contact_email) FROM events \
             WHERE campaign_id = $1 AND event_type = 'open'",
        )
        .bind(campaign_id)
        .fetch_one(pool)
        .await?;
        let clicks: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT contact_email) FROM events \
             WHERE campaign_id = $1 AND event_type = 'click'",
        )
        .bind(campaign_id)
        .fetch_one(pool)
        .await?;
        let bounces: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM campaign_sends \
             WHERE campaign_id = $1 AND bounce_type IS NOT NULL",
        )
        .bind(campaign_id)
        .fetch_one(pool)
        .await?;

        let rate = |n: i64| {
            if delivered > 0 {
                (n as f64 / delivered as f64 * 10_000.0).round() / 100.0
            } else {
                0.0
            }
        };

        Ok(Some(CampaignStats {
            campaign_id,
            sent,
            delivered,
            opens,
            clicks,
            bounces,
            open_rate: rate(opens),
            click_rate: rate(clicks),
        }))
    }
}
