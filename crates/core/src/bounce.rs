//! Bounce and suppression classification types.
//!
//! These map 1:1 onto the `suppressions.reason` and
//! `suppressions.bounce_type` / `campaign_sends.bounce_type` columns, which
//! store the lowercase string forms.

use serde::{Deserialize, Serialize};

/// Provider-reported bounce classification.
///
/// `Hard` means the mailbox is permanently undeliverable; `Soft` covers
/// transient failures (full mailbox, greylisting, temporary DNS issues).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BounceKind {
    Hard,
    Soft,
}

impl BounceKind {
    /// The string form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            BounceKind::Hard => "hard",
            BounceKind::Soft => "soft",
        }
    }

    /// Classify a provider bounce-type discriminator.
    ///
    /// The provider reports `"Permanent"` for invalid mailboxes; everything
    /// else (`"Transient"`, `"Undetermined"`) is treated as soft.
    pub fn from_notification(bounce_type: &str) -> Self {
        if bounce_type == "Permanent" {
            BounceKind::Hard
        } else {
            BounceKind::Soft
        }
    }

    /// Hard bounces additionally flip the contact's unsubscribed flag;
    /// soft bounces only suppress.
    pub fn unsubscribes_contact(self) -> bool {
        matches!(self, BounceKind::Hard)
    }
}

/// Why an address sits in the suppression ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionReason {
    Bounce,
    Complaint,
}

impl SuppressionReason {
    /// The string form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            SuppressionReason::Bounce => "bounce",
            SuppressionReason::Complaint => "complaint",
        }
    }
}
