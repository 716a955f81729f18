//! Email notification delivery via SMTP.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport to send the HTML
//! notification emails rendered by [`crate::templates`]. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be constructed.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use helpdesk_core::email::Email;
use helpdesk_core::error::{CoreError, CoreResult};
use helpdesk_core::ports::Notifier;
use helpdesk_core::ticket::TicketStatus;
use helpdesk_core::types::DbId;

use crate::templates::{self, EmailContent};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

impl From<EmailError> for CoreError {
    fn from(err: EmailError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@helpdesk.local";

/// Default display name when `SMTP_FROM_NAME` is not set.
const DEFAULT_FROM_NAME: &str = "Helpdesk Support";

/// Configuration for the SMTP notifier.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Display name shown next to the sender address.
    pub from_name: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and notifications should only be logged.
    ///
    /// | Variable         | Required | Default                  |
    /// |------------------|----------|--------------------------|
    /// | `SMTP_HOST`      | yes      |                          |
    /// | `SMTP_PORT`      | no       | `587`                    |
    /// | `SMTP_FROM`      | no       | `noreply@helpdesk.local` |
    /// | `SMTP_FROM_NAME` | no       | `Helpdesk Support`       |
    /// | `SMTP_USER`      | no       |                          |
    /// | `SMTP_PASSWORD`  | no       |                          |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let smtp_host = lookup("SMTP_HOST").filter(|h| !h.trim().is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: lookup("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: lookup("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: lookup("SMTP_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            smtp_user: lookup("SMTP_USER"),
            smtp_password: lookup("SMTP_PASSWORD"),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends ticket notification emails via SMTP.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpNotifier {
    /// Build the SMTP transport and sender mailbox from `config`.
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let address: Address = config.from_address.parse()?;
        let sender = Mailbox::new(Some(config.from_name.clone()), address);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            sender,
        })
    }

    async fn deliver(&self, to: &Email, content: EmailContent) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(to.as_str().parse()?)
            .subject(content.subject)
            .header(ContentType::TEXT_HTML)
            .body(content.html)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.mailer.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_ticket_created(&self, to: &Email, ticket_id: DbId, title: &str) -> CoreResult<()> {
        self.deliver(to, templates::ticket_created(ticket_id, title))
            .await?;
        tracing::info!(to = %to, ticket_id = %ticket_id, "Ticket created email sent");
        Ok(())
    }

    async fn send_ticket_status_changed(
        &self,
        to: &Email,
        ticket_id: DbId,
        status: TicketStatus,
    ) -> CoreResult<()> {
        self.deliver(to, templates::ticket_status_changed(ticket_id, status))
            .await?;
        tracing::info!(to = %to, ticket_id = %ticket_id, status = %status, "Status change email sent");
        Ok(())
    }

    async fn send_ticket_response(&self, to: &Email, ticket_id: DbId, response: &str) -> CoreResult<()> {
        self.deliver(to, templates::ticket_response(ticket_id, response))
            .await?;
        tracing::info!(to = %to, ticket_id = %ticket_id, "Ticket response email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_is_none_without_smtp_host() {
        assert!(EmailConfig::from_lookup(lookup(&[])).is_none());
        assert!(EmailConfig::from_lookup(lookup(&[("SMTP_HOST", "  ")])).is_none());
    }

    #[test]
    fn config_applies_defaults() {
        let config = EmailConfig::from_lookup(lookup(&[("SMTP_HOST", "smtp.example.com")])).unwrap();
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.from_address, "noreply@helpdesk.local");
        assert_eq!(config.from_name, "Helpdesk Support");
        assert!(config.smtp_user.is_none());
    }

    #[test]
    fn config_reads_overrides() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_FROM", "help@example.com"),
            ("SMTP_USER", "mailer"),
            ("SMTP_PASSWORD", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.smtp_port, 2525);
        assert_eq!(config.from_address, "help@example.com");
        assert_eq!(config.smtp_user.as_deref(), Some("mailer"));
    }

    #[test]
    fn notifier_rejects_bad_sender_address() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_FROM", "not-an-email"),
        ]))
        .unwrap();
        assert!(matches!(SmtpNotifier::new(&config), Err(EmailError::Address(_))));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_maps_to_internal() {
        let err: CoreError = EmailError::Build("boom".into()).into();
        assert!(matches!(err, CoreError::Internal(msg) if msg.contains("boom")));
    }
}
