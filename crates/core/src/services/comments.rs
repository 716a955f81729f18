use std::sync::Arc;

use crate::comment::{validate_content, Comment, NewComment};
use crate::error::{CoreError, CoreResult};
use crate::notify::{NotificationJob, NotificationQueue};
use crate::ports::{CommentStore, TicketStore};
use crate::types::DbId;
use crate::user::User;

#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub ticket_id: DbId,
    pub content: String,
    pub is_internal: bool,
}

pub struct CommentService {
    tickets: Arc<dyn TicketStore>,
    comments: Arc<dyn CommentStore>,
    notifications: NotificationQueue,
}

impl CommentService {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        comments: Arc<dyn CommentStore>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            tickets,
            comments,
            notifications,
        }
    }

    /// Add a staff comment authored by `actor`.
    ///
    /// Public comments also notify the ticket's client with the response text.
    pub async fn create(&self, actor: &User, input: CreateCommentInput) -> CoreResult<Comment> {
        if !actor.can_manage_all_tickets() {
            return Err(CoreError::Forbidden(
                "Only support staff can comment on tickets".into(),
            ));
        }

        validate_content(&input.content)?;

        let ticket = self
            .tickets
            .find_by_id(input.ticket_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Ticket", input.ticket_id))?;

        let comment = self
            .comments
            .create(NewComment {
                ticket_id: ticket.id,
                user_id: actor.id,
                content: input.content,
                is_internal: input.is_internal,
            })
            .await?;

        tracing::info!(
            comment_id = %comment.id,
            ticket_id = %ticket.id,
            user_id = %actor.id,
            is_internal = comment.is_internal,
            "Comment created"
        );

        if !comment.is_internal {
            self.notifications.submit(NotificationJob::TicketResponse {
                client_id: ticket.client_id,
                ticket_id: ticket.id,
                response: comment.content.clone(),
            });
        }

        Ok(comment)
    }
}
