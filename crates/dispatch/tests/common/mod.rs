use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sendloop_core::token::TokenCodec;
use sendloop_dispatch::Dispatcher;
use sendloop_mailer::{MailProvider, MailerError};
use sqlx::PgPool;

/// Recording stub provider: accepts everything by default, rejects the
/// recipients listed in `reject`.
pub struct StubMailer {
    verified: Vec<String>,
    reject: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
    pub last_html: Mutex<Option<String>>,
}

impl StubMailer {
    pub fn new(verified: &[&str]) -> Self {
        Self {
            verified: verified.iter().map(|s| s.to_string()).collect(),
            reject: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            last_html: Mutex::new(None),
        }
    }

    pub fn rejecting(mut self, recipients: &[&str]) -> Self {
        self.reject = recipients.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MailProvider for StubMailer {
    async fn send(
        &self,
        _sender: &str,
        recipient: &str,
        _subject: &str,
        html: &str,
    ) -> Result<String, MailerError> {
        self.calls.lock().unwrap().push(recipient.to_string());
        *self.last_html.lock().unwrap() = Some(html.to_string());
        if self.reject.contains(recipient) {
            return Err(MailerError::Rejected(format!("{recipient} refused")));
        }
        Ok(format!("msg-{}", self.call_count()))
    }

    async fn verified_senders(&self) -> Result<Vec<String>, MailerError> {
        Ok(self.verified.clone())
    }
}

/// Build a dispatcher over the given pool and stub, with no inter-send delay
/// unless a test is exercising the rate ceiling.
pub fn dispatcher(
    pool: PgPool,
    mailer: std::sync::Arc<StubMailer>,
    delay: Duration,
) -> Dispatcher {
    Dispatcher::new(
        pool,
        mailer,
        TokenCodec::new("test-secret"),
        "http://h".to_string(),
        delay,
    )
}

/// Insert a campaign and return its id.
pub async fn seed_campaign(pool: &PgPool, sender: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO campaigns (subject, sender, html) VALUES ('Hello', $1, '<p>Hello</p>') RETURNING id",
    )
    .bind(sender)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a contact.
pub async fn seed_contact(pool: &PgPool, email: &str) {
    sqlx::query("INSERT INTO contacts (email) VALUES ($1)")
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}
