//! Repository for the `contacts` table.

use sendloop_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::contact::Contact;

/// Column list for `contacts` queries.
const COLUMNS: &str = "email, name, unsubscribed, created_at, updated_at";

/// Provides read/write operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a contact, skipping silently if the email already exists.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn insert_ignore(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO contacts (email, name) VALUES ($1, $2) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .bind(name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch a contact by email.
    pub async fn get(pool: &PgPool, email: &str) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE email = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all contacts ordered by email.
    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY email");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }

    /// Flip the unsubscribed flag for a contact.
    ///
    /// Takes an executor so the webhook ingestor can run it inside the same
    /// transaction as the suppression upsert.
    pub async fn set_unsubscribed(
        executor: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE contacts SET unsubscribed = TRUE, updated_at = now() WHERE email = $1")
            .bind(email)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Resolve the eligible recipient set for a campaign: every contact that
    /// is not unsubscribed, not in the suppression ledger, and has no send
    /// record for this campaign yet.
    ///
    /// Ordered by email so a resumed run walks the remainder in the same
    /// order as the original run.
    pub async fn list_eligible(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT c.email FROM contacts c \
             WHERE c.unsubscribed = FALSE \
               AND NOT EXISTS (SELECT 1 FROM suppressions s WHERE s.email = c.email) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM campaign_sends cs \
                   WHERE cs.campaign_id = $1 AND cs.contact_email = c.email) \
             ORDER BY c.email",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }
}
