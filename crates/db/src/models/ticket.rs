//! Row model for the `tickets` table.

use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{Ticket, TicketStatus};
use helpdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub client_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl TicketRow {
    pub fn into_domain(self) -> Result<Ticket, CoreError> {
        let status = self
            .status
            .parse::<TicketStatus>()
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        Ok(Ticket {
            id: self.id,
            title: self.title,
            description: self.description,
            status,
            client_id: self.client_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            resolved_at: self.resolved_at,
        })
    }
}

/// One `GROUP BY status` result row.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}
