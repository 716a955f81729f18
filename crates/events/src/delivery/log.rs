//! Notifier used when no SMTP server is configured.

use async_trait::async_trait;

use helpdesk_core::email::Email;
use helpdesk_core::error::CoreResult;
use helpdesk_core::ports::Notifier;
use helpdesk_core::ticket::TicketStatus;
use helpdesk_core::types::DbId;

use crate::templates;

/// Writes each notification to the log instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_ticket_created(&self, to: &Email, ticket_id: DbId, title: &str) -> CoreResult<()> {
        let content = templates::ticket_created(ticket_id, title);
        tracing::info!(to = %to, ticket_id = %ticket_id, subject = %content.subject, "Email delivery disabled, notification logged");
        Ok(())
    }

    async fn send_ticket_status_changed(
        &self,
        to: &Email,
        ticket_id: DbId,
        status: TicketStatus,
    ) -> CoreResult<()> {
        let content = templates::ticket_status_changed(ticket_id, status);
        tracing::info!(to = %to, ticket_id = %ticket_id, status = %status, subject = %content.subject, "Email delivery disabled, notification logged");
        Ok(())
    }

    async fn send_ticket_response(&self, to: &Email, ticket_id: DbId, response: &str) -> CoreResult<()> {
        let content = templates::ticket_response(ticket_id, response);
        tracing::info!(to = %to, ticket_id = %ticket_id, subject = %content.subject, "Email delivery disabled, notification logged");
        Ok(())
    }
}
