//! Eligible-recipient resolution.

use sendloop_core::types::DbId;
use sendloop_db::repositories::ContactRepo;
use sqlx::PgPool;

/// Computes the recipient set for a campaign run.
///
/// Eligible means: a known contact, not flagged unsubscribed, absent from
/// the suppression ledger, and with no send record for this campaign. The
/// set is recomputed fresh on every dispatch invocation so unsubscribes and
/// suppressions landing mid-run are honored on the next run, and the
/// send-time re-check in the loop covers the current one.
pub struct EligibilityResolver;

impl EligibilityResolver {
    /// Resolve the eligible set, ordered by email for deterministic
    /// resumption after a partial run.
    pub async fn resolve(pool: &PgPool, campaign_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        ContactRepo::list_eligible(pool, campaign_id).await
    }
}
