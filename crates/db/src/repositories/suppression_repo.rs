//! Repository for the `suppressions` table.

use sendloop_core::bounce::{BounceKind, SuppressionReason};
use sqlx::{PgExecutor, PgPool};

use crate::models::suppression::Suppression;

/// Column list for `suppressions` queries.
const COLUMNS: &str = "email, reason, bounce_type, created_at, updated_at";

/// Provides read/write operations for the suppression ledger.
pub struct SuppressionRepo;

impl SuppressionRepo {
    /// Insert or refresh the suppression entry for an email.
    ///
    /// A later notification overwrites the stored reason and classification;
    /// the ledger keeps the most recent cause.
    pub async fn upsert(
        executor: impl PgExecutor<'_>,
        email: &str,
        reason: SuppressionReason,
        bounce_kind: Option<BounceKind>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO suppressions (email, reason, bounce_type) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO UPDATE \
             SET reason = $2, bounce_type = $3, updated_at = now()",
        )
        .bind(email)
        .bind(reason.as_str())
        .bind(bounce_kind.map(BounceKind::as_str))
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Fetch the suppression entry for an email, if any.
    pub async fn get(pool: &PgPool, email: &str) -> Result<Option<Suppression>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppressions WHERE email = $1");
        sqlx::query_as::<_, Suppression>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
