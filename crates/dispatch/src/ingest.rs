//! Asynchronous delivery-notification ingestion.
//!
//! The provider pushes bounce and complaint notifications in one of two JSON
//! shapes: a wrapped notification envelope whose `Message` field is itself a
//! JSON string, or the same payload flat at the top level. Both are
//! normalized into [`DeliveryNotification`] at the boundary before any
//! business logic runs.

use sendloop_core::bounce::{BounceKind, SuppressionReason};
use sendloop_db::repositories::{ContactRepo, EventRepo, SendRepo, SuppressionRepo};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// The wrapped envelope shape: notification payload serialized into a string.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Message")]
    message: String,
}

/// The provider's notification payload, discriminated by `notificationType`.
#[derive(Debug, Deserialize)]
#[serde(tag = "notificationType")]
enum ProviderNotification {
    Bounce {
        #[serde(default)]
        bounce: BouncePayload,
    },
    Complaint {
        #[serde(default)]
        complaint: ComplaintPayload,
    },
}

#[derive(Debug, Default, Deserialize)]
struct BouncePayload {
    #[serde(rename = "bounceType", default)]
    bounce_type: String,
    #[serde(rename = "bouncedRecipients", default)]
    bounced_recipients: Vec<NotifiedRecipient>,
}

#[derive(Debug, Default, Deserialize)]
struct ComplaintPayload {
    #[serde(rename = "complainedRecipients", default)]
    complained_recipients: Vec<NotifiedRecipient>,
}

#[derive(Debug, Deserialize)]
struct NotifiedRecipient {
    #[serde(rename = "emailAddress")]
    email_address: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalized form
// ---------------------------------------------------------------------------

/// A provider notification after boundary normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryNotification {
    Bounce {
        kind: BounceKind,
        recipients: Vec<String>,
    },
    Complaint {
        recipients: Vec<String>,
    },
}

/// Parse either webhook shape into a [`DeliveryNotification`].
///
/// Returns `None` for unrecognized payloads (subscription confirmations,
/// delivery receipts, malformed bodies); the webhook endpoint acknowledges
/// those without acting on them.
pub fn parse_notification(body: &serde_json::Value) -> Option<DeliveryNotification> {
    // Enveloped shape first: `Type: "Notification"` with a JSON string body.
    if let Ok(envelope) = Envelope::deserialize(body) {
        if envelope.kind != "Notification" {
            return None;
        }
        let inner: ProviderNotification = serde_json::from_str(&envelope.message).ok()?;
        return Some(normalize(inner));
    }
    // Flat shape: discriminator at the top level.
    let flat: ProviderNotification = ProviderNotification::deserialize(body).ok()?;
    Some(normalize(flat))
}

fn normalize(notification: ProviderNotification) -> DeliveryNotification {
    match notification {
        ProviderNotification::Bounce { bounce } => DeliveryNotification::Bounce {
            kind: BounceKind::from_notification(&bounce.bounce_type),
            recipients: collect_emails(bounce.bounced_recipients),
        },
        ProviderNotification::Complaint { complaint } => DeliveryNotification::Complaint {
            recipients: collect_emails(complaint.complained_recipients),
        },
    }
}

fn collect_emails(recipients: Vec<NotifiedRecipient>) -> Vec<String> {
    recipients
        .into_iter()
        .filter_map(|r| r.email_address)
        .collect()
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Per-notification processing counters. Failures are logged, never
/// surfaced to the provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestSummary {
    pub processed: u64,
    pub failed: u64,
}

/// Applies a normalized notification to the suppression ledger, contact
/// flags, and event log.
pub struct EventIngestor;

impl EventIngestor {
    /// Process every recipient in the notification.
    ///
    /// Each recipient gets its own transaction: a storage failure rolls back
    /// that recipient's changes only and the rest of the batch continues.
    pub async fn process(pool: &PgPool, notification: DeliveryNotification) -> IngestSummary {
        let mut summary = IngestSummary::default();

        match notification {
            DeliveryNotification::Bounce { kind, recipients } => {
                for email in recipients {
                    match Self::apply_bounce(pool, &email, kind).await {
                        Ok(()) => summary.processed += 1,
                        Err(err) => {
                            summary.failed += 1;
                            tracing::error!(%email, error = %err, "Failed to process bounce");
                        }
                    }
                }
            }
            DeliveryNotification::Complaint { recipients } => {
                for email in recipients {
                    match Self::apply_complaint(pool, &email).await {
                        Ok(()) => summary.processed += 1,
                        Err(err) => {
                            summary.failed += 1;
                            tracing::error!(%email, error = %err, "Failed to process complaint");
                        }
                    }
                }
            }
        }

        summary
    }

    /// Suppress the address; hard bounces additionally unsubscribe the
    /// contact and append a bounce event. Soft bounces suppress only — the
    /// contact keeps their subscription flag.
    async fn apply_bounce(pool: &PgPool, email: &str, kind: BounceKind) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        SuppressionRepo::upsert(&mut *tx, email, SuppressionReason::Bounce, Some(kind)).await?;
        SendRepo::set_bounce_type(&mut *tx, email, kind).await?;

        if kind.unsubscribes_contact() {
            ContactRepo::set_unsubscribed(&mut *tx, email).await?;
            let metadata = json!({ "bounce_type": kind.as_str() });
            EventRepo::insert(&mut *tx, None, email, "bounce", Some(&metadata)).await?;
        }

        tx.commit().await
    }

    /// Suppress, unsubscribe, and log a complaint event.
    async fn apply_complaint(pool: &PgPool, email: &str) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        SuppressionRepo::upsert(&mut *tx, email, SuppressionReason::Complaint, None).await?;
        ContactRepo::set_unsubscribed(&mut *tx, email).await?;
        EventRepo::insert(&mut *tx, None, email, "complaint", None).await?;

        tx.commit().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
