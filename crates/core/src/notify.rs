//! Fire-and-forget notification queue.
//!
//! Services push [`NotificationJob`]s and return immediately. A worker owned
//! by the delivery layer drains the receiving half and logs any failure; no
//! delivery outcome ever reaches the request that produced the job.

use tokio::sync::mpsc;

use crate::email::Email;
use crate::ticket::TicketStatus;
use crate::types::DbId;

/// A notification waiting to be delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationJob {
    /// Sent to the client who opened the ticket.
    TicketCreated {
        recipient: Email,
        ticket_id: DbId,
        title: String,
    },
    /// The worker resolves `client_id` to an address at delivery time.
    StatusChanged {
        client_id: DbId,
        ticket_id: DbId,
        status: TicketStatus,
    },
    TicketResponse {
        client_id: DbId,
        ticket_id: DbId,
        response: String,
    },
}

impl NotificationJob {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationJob::TicketCreated { .. } => "ticket_created",
            NotificationJob::StatusChanged { .. } => "ticket_status_changed",
            NotificationJob::TicketResponse { .. } => "ticket_response",
        }
    }

    pub fn ticket_id(&self) -> DbId {
        match self {
            NotificationJob::TicketCreated { ticket_id, .. }
            | NotificationJob::StatusChanged { ticket_id, .. }
            | NotificationJob::TicketResponse { ticket_id, .. } => *ticket_id,
        }
    }
}

/// Sending half of the notification queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: mpsc::UnboundedSender<NotificationJob>,
}

impl NotificationQueue {
    /// Create a queue and the receiver a worker should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Enqueue `job` without waiting. A closed queue drops the job with a warning.
    pub fn submit(&self, job: NotificationJob) {
        let kind = job.kind();
        let ticket_id = job.ticket_id();
        if self.sender.send(job).is_err() {
            tracing::warn!(kind, %ticket_id, "Notification queue closed, dropping job");
        }
    }
}
