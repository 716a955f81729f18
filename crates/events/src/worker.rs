//! Background worker that delivers queued notifications.
//!
//! The worker owns the receiving half of the
//! [`NotificationQueue`](helpdesk_core::notify::NotificationQueue) and runs
//! until every sender has been dropped. Jobs are delivered one at a time in
//! submission order. A failed delivery is logged and never retried.

use std::sync::Arc;

use tokio::sync::mpsc;

use helpdesk_core::email::Email;
use helpdesk_core::error::{CoreError, CoreResult};
use helpdesk_core::notify::NotificationJob;
use helpdesk_core::ports::{Notifier, UserStore};
use helpdesk_core::types::DbId;

pub struct NotificationWorker {
    users: Arc<dyn UserStore>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationWorker {
    pub fn new(users: Arc<dyn UserStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { users, notifier }
    }

    /// Run the delivery loop.
    ///
    /// This method runs until the queue is closed. It should be spawned as a
    /// background task via `tokio::spawn`.
    pub async fn run(self, mut receiver: mpsc::UnboundedReceiver<NotificationJob>) {
        tracing::info!("Notification worker started");

        while let Some(job) = receiver.recv().await {
            if let Err(e) = self.deliver(&job).await {
                tracing::warn!(
                    error = %e,
                    kind = job.kind(),
                    ticket_id = %job.ticket_id(),
                    "Failed to deliver notification",
                );
            }
        }

        tracing::info!("Notification queue closed, worker shutting down");
    }

    /// Deliver a single job through the notifier.
    pub async fn deliver(&self, job: &NotificationJob) -> CoreResult<()> {
        match job {
            NotificationJob::TicketCreated {
                recipient,
                ticket_id,
                title,
            } => {
                self.notifier
                    .send_ticket_created(recipient, *ticket_id, title)
                    .await
            }
            NotificationJob::StatusChanged {
                client_id,
                ticket_id,
                status,
            } => {
                let to = self.recipient(*client_id).await?;
                self.notifier
                    .send_ticket_status_changed(&to, *ticket_id, *status)
                    .await
            }
            NotificationJob::TicketResponse {
                client_id,
                ticket_id,
                response,
            } => {
                let to = self.recipient(*client_id).await?;
                self.notifier
                    .send_ticket_response(&to, *ticket_id, response)
                    .await
            }
        }
    }

    async fn recipient(&self, user_id: DbId) -> CoreResult<Email> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.email)
            .ok_or_else(|| CoreError::not_found("User", user_id))
    }
}
