//! The campaign send loop.

use std::sync::Arc;
use std::time::Duration;

use sendloop_core::instrument::instrument_html;
use sendloop_core::token::TokenCodec;
use sendloop_core::types::DbId;
use sendloop_db::models::campaign::Campaign;
use sendloop_db::repositories::{CampaignRepo, SendRepo};
use sendloop_mailer::{MailProvider, MailerError};
use serde::Serialize;
use sqlx::PgPool;

use crate::eligibility::EligibilityResolver;

/// Error type for dispatch runs.
///
/// Per-recipient send failures are not errors at this level; they are
/// recorded as failed send rows and counted in the outcome. These variants
/// abort the whole run before any send happens (or reflect a storage fault
/// mid-run).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Campaign {0} not found")]
    CampaignNotFound(DbId),

    #[error("Sender {sender} is not verified; verified senders: {verified:?}")]
    SenderNotVerified {
        sender: String,
        verified: Vec<String>,
    },

    /// The provider could not report its verified senders, or a test send
    /// failed outright.
    #[error("Provider error: {0}")]
    Provider(#[from] MailerError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Counters returned by a dispatch run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DispatchOutcome {
    pub sent: u64,
    pub failed: u64,
    pub total_eligible: u64,
}

/// Drives campaign sends: strictly sequential, one provider call at a time,
/// with a fixed inter-send delay to stay under the provider's rate ceiling.
///
/// The provider is constructor-injected so tests can substitute a stub.
pub struct Dispatcher {
    pool: PgPool,
    mailer: Arc<dyn MailProvider>,
    codec: TokenCodec,
    base_url: String,
    send_delay: Duration,
}

impl Dispatcher {
    pub fn new(
        pool: PgPool,
        mailer: Arc<dyn MailProvider>,
        codec: TokenCodec,
        base_url: String,
        send_delay: Duration,
    ) -> Self {
        Self {
            pool,
            mailer,
            codec,
            base_url,
            send_delay,
        }
    }

    /// Run the full dispatch loop for a campaign.
    ///
    /// Re-runnable: recipients with an existing send record are skipped, so
    /// invoking this twice in sequence never produces a second provider call
    /// for the same (campaign, recipient) pair. A run interrupted mid-way
    /// resumes naturally on re-invocation.
    pub async fn send_campaign(&self, campaign_id: DbId) -> Result<DispatchOutcome, DispatchError> {
        let campaign = self.load_campaign(campaign_id).await?;
        self.check_sender(&campaign.sender).await?;

        let recipients = EligibilityResolver::resolve(&self.pool, campaign_id).await?;
        let total = recipients.len();

        tracing::info!(
            campaign_id,
            subject = %campaign.subject,
            sender = %campaign.sender,
            total_eligible = total,
            "Starting campaign send"
        );

        let mut sent: u64 = 0;
        let mut failed: u64 = 0;

        for (i, email) in recipients.iter().enumerate() {
            // Re-check at send time: the set was computed at run start, and
            // a concurrent run of the same campaign may have got here first.
            if SendRepo::exists(&self.pool, campaign_id, email).await? {
                continue;
            }

            self.send_one(&campaign, email, &mut sent, &mut failed)
                .await?;

            // Rate ceiling: fixed delay after every attempt except the last.
            if i + 1 < total {
                tokio::time::sleep(self.send_delay).await;
            }
        }

        tracing::info!(campaign_id, sent, failed, total_eligible = total, "Campaign send complete");

        Ok(DispatchOutcome {
            sent,
            failed,
            total_eligible: total as u64,
        })
    }

    /// Send a single test email, bypassing eligibility and suppression
    /// checks and writing no send record. Operator-directed test sends are
    /// deliberately not de-duplicated.
    pub async fn send_test(
        &self,
        campaign_id: DbId,
        recipient: &str,
    ) -> Result<String, DispatchError> {
        let campaign = self.load_campaign(campaign_id).await?;
        self.check_sender(&campaign.sender).await?;

        let html = self.instrument(&campaign, recipient);
        let message_id = self
            .mailer
            .send(&campaign.sender, recipient, &campaign.subject, &html)
            .await?;

        tracing::info!(campaign_id, to = recipient, %message_id, "Test email sent");
        Ok(message_id)
    }

    async fn load_campaign(&self, campaign_id: DbId) -> Result<Campaign, DispatchError> {
        CampaignRepo::get(&self.pool, campaign_id)
            .await?
            .ok_or(DispatchError::CampaignNotFound(campaign_id))
    }

    /// Abort the run up front if the provider will not accept this sender.
    /// No sends are attempted and no rows are written on failure.
    async fn check_sender(&self, sender: &str) -> Result<(), DispatchError> {
        let verified = self.mailer.verified_senders().await?;
        if !verified.iter().any(|v| v == sender) {
            return Err(DispatchError::SenderNotVerified {
                sender: sender.to_string(),
                verified,
            });
        }
        Ok(())
    }

    fn instrument(&self, campaign: &Campaign, email: &str) -> String {
        let token = self.codec.issue(email, campaign.id);
        instrument_html(&campaign.html, campaign.id, email, &self.base_url, &token)
    }

    async fn send_one(
        &self,
        campaign: &Campaign,
        email: &str,
        sent: &mut u64,
        failed: &mut u64,
    ) -> Result<(), DispatchError> {
        let html = self.instrument(campaign, email);

        match self
            .mailer
            .send(&campaign.sender, email, &campaign.subject, &html)
            .await
        {
            Ok(message_id) => {
                SendRepo::record_success(&self.pool, campaign.id, email, &message_id).await?;
                *sent += 1;
                tracing::debug!(campaign_id = campaign.id, to = email, %message_id, "Sent");
            }
            Err(err) => {
                // A failed attempt is terminal for this pair: the failure row
                // blocks retries in this run and future runs alike.
                let bounce_kind = err.bounce_kind();
                tracing::warn!(
                    campaign_id = campaign.id,
                    to = email,
                    error = %err,
                    ?bounce_kind,
                    "Send failed"
                );
                SendRepo::record_failure(&self.pool, campaign.id, email, bounce_kind).await?;
                *failed += 1;
            }
        }
        Ok(())
    }
}
