//! Unsubscribe token codec.
//!
//! Tokens are lowercase-hex HMAC-SHA256 digests over `"{email}:{campaign_id}"`
//! keyed with a server-side secret. They are deterministic and never expire,
//! so unsubscribe links keep working for the lifetime of a campaign without a
//! stored token table. Verification is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies unsubscribe tokens for (recipient, campaign) pairs.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Derive the token for a recipient/campaign pair.
    ///
    /// Same inputs always yield the same token.
    pub fn issue(&self, email: &str, campaign_id: DbId) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{email}:{campaign_id}").as_bytes());
        let digest = mac.finalize().into_bytes();
        format!("{digest:x}")
    }

    /// Check a presented token against the expected one for this pair.
    ///
    /// A failed check is an ordinary `false`, not an error; callers decide
    /// how to respond. The underlying comparison runs in constant time.
    pub fn verify(&self, token: &str, email: &str, campaign_id: DbId) -> bool {
        let Some(raw) = hex_decode(token) else {
            return false;
        };
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{email}:{campaign_id}").as_bytes());
        mac.verify_slice(&raw).is_ok()
    }
}

/// Decode a lowercase/uppercase hex string. Returns `None` on odd length or
/// non-hex characters.
fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}
