//! Transactional email provider client.
//!
//! [`MailProvider`] is the capability the dispatch engine is handed: a send
//! operation returning a provider message id, plus sender-authorization
//! introspection. The production implementation is [`SmtpMailer`] over the
//! `lettre` async SMTP transport; tests substitute a stub.

use async_trait::async_trait;
use sendloop_core::bounce::BounceKind;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for provider send failures.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// SMTP transport-level failure (authentication, connection, rejection).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The provider rejected the recipient with a bounce-like response.
    /// Carried by stub providers in tests; SMTP rejections surface as
    /// [`MailerError::Transport`] and are classified from the status code.
    #[error("Recipient rejected: {0}")]
    Rejected(String),
}

impl MailerError {
    /// Best-effort bounce classification from the provider's structured
    /// response code: a permanent negative completion (5xx) is a hard
    /// bounce, a transient one (4xx) is soft. Errors without an SMTP status
    /// (connection failures, build errors) carry no classification.
    pub fn bounce_kind(&self) -> Option<BounceKind> {
        use lettre::transport::smtp::response::Severity;

        match self {
            MailerError::Transport(err) => err.status().map(|code| match code.severity {
                Severity::PermanentNegativeCompletion => BounceKind::Hard,
                _ => BounceKind::Soft,
            }),
            MailerError::Rejected(_) => Some(BounceKind::Soft),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MailProvider
// ---------------------------------------------------------------------------

/// Capability object for the outbound email provider.
///
/// Constructor-injected into the dispatch engine and the test-send handler
/// so tests can substitute a recording stub.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Send one message, returning the provider's message identifier.
    async fn send(
        &self,
        sender: &str,
        recipient: &str,
        subject: &str,
        html: &str,
    ) -> Result<String, MailerError>;

    /// Addresses this account is authorized to send from.
    async fn verified_senders(&self) -> Result<Vec<String>, MailerError>;
}

// ---------------------------------------------------------------------------
// SmtpConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration for the SMTP mail provider.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Sender addresses the provider account is verified for, from the
    /// comma-separated `VERIFIED_SENDERS` variable.
    pub verified_senders: Vec<String>,
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that outbound
    /// email is not configured.
    ///
    /// | Variable           | Required | Default |
    /// |--------------------|----------|---------|
    /// | `SMTP_HOST`        | yes      | —       |
    /// | `SMTP_PORT`        | no       | `587`   |
    /// | `SMTP_USER`        | no       | —       |
    /// | `SMTP_PASSWORD`    | no       | —       |
    /// | `VERIFIED_SENDERS` | no       | empty   |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            verified_senders: std::env::var("VERIFIED_SENDERS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends campaign email via SMTP.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MailProvider for SmtpMailer {
    async fn send(
        &self,
        sender: &str,
        recipient: &str,
        subject: &str,
        html: &str,
    ) -> Result<String, MailerError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(sender.parse()?)
            .to(recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| MailerError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        let response = mailer.send(email).await?;

        // The accept line usually carries the server's queue id
        // ("250 2.0.0 OK: queued as ABC123"); that is the closest thing SMTP
        // has to a provider message id.
        let message_id = response.message().collect::<Vec<_>>().join(" ");

        tracing::info!(to = recipient, %message_id, "Campaign email sent");
        Ok(message_id)
    }

    async fn verified_senders(&self) -> Result<Vec<String>, MailerError> {
        Ok(self.config.verified_senders.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
