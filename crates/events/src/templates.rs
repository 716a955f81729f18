//! Email subjects and HTML bodies for ticket notifications.

use helpdesk_core::ticket::TicketStatus;
use helpdesk_core::types::DbId;

/// A rendered email, ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

pub fn ticket_created(ticket_id: DbId, title: &str) -> EmailContent {
    EmailContent {
        subject: "Ticket Created - Support Desk".to_string(),
        html: format!(
            "<h2>Ticket Created</h2>\n\
             <p>Your ticket has been created successfully.</p>\n\
             <p><strong>ID:</strong> {ticket_id}</p>\n\
             <p><strong>Title:</strong> {}</p>\n\
             <p>We will let you know when its status changes.</p>",
            escape_html(title)
        ),
    }
}

pub fn ticket_status_changed(ticket_id: DbId, status: TicketStatus) -> EmailContent {
    EmailContent {
        subject: "Ticket Update - Support Desk".to_string(),
        html: format!(
            "<h2>Ticket Status Changed</h2>\n\
             <p>The status of your ticket has changed.</p>\n\
             <p><strong>ID:</strong> {ticket_id}</p>\n\
             <p><strong>New status:</strong> {}</p>",
            status_label(status)
        ),
    }
}

pub fn ticket_response(ticket_id: DbId, response: &str) -> EmailContent {
    EmailContent {
        subject: "New Response - Support Desk".to_string(),
        html: format!(
            "<h2>New Response on Your Ticket</h2>\n\
             <p>You have received a new response.</p>\n\
             <p><strong>ID:</strong> {ticket_id}</p>\n\
             <p><strong>Response:</strong></p>\n\
             <p>{}</p>",
            escape_html(response)
        ),
    }
}

fn status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Pending => "Pending",
        TicketStatus::InProgress => "In progress",
        TicketStatus::Resolved => "Resolved",
        TicketStatus::Closed => "Closed",
    }
}

/// Escape user-supplied text for inclusion in an HTML body.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
