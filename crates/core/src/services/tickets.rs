use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::notify::{NotificationJob, NotificationQueue};
use crate::pagination::{Page, PageRequest};
use crate::ports::{CommentStore, TicketStore, UserStore};
use crate::ticket::{
    validate_description, validate_title, NewTicket, Ticket, TicketDetail, TicketFilter,
    TicketStatus,
};
use crate::types::DbId;
use crate::user::User;

#[derive(Debug, Clone)]
pub struct CreateTicketInput {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTicketInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The filter actually applied for `actor`: clients only ever see their own
/// tickets, whatever `client_id` they asked for.
pub fn effective_filter(actor: &User, mut filter: TicketFilter) -> TicketFilter {
    if actor.is_client() {
        filter.client_id = Some(actor.id);
    }
    filter
}

pub struct TicketService {
    tickets: Arc<dyn TicketStore>,
    users: Arc<dyn UserStore>,
    comments: Arc<dyn CommentStore>,
    notifications: NotificationQueue,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        users: Arc<dyn UserStore>,
        comments: Arc<dyn CommentStore>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            tickets,
            users,
            comments,
            notifications,
        }
    }

    /// Open a ticket owned by `actor`. Always starts `pending`.
    pub async fn create(&self, actor: &User, input: CreateTicketInput) -> CoreResult<Ticket> {
        validate_title(&input.title)?;
        validate_description(&input.description)?;

        let client = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Client", actor.id))?;

        let ticket = self
            .tickets
            .create(NewTicket::pending(input.title, input.description, client.id))
            .await?;

        tracing::info!(ticket_id = %ticket.id, client_id = %client.id, "Ticket created");

        self.notifications.submit(NotificationJob::TicketCreated {
            recipient: client.email,
            ticket_id: ticket.id,
            title: ticket.title.clone(),
        });

        Ok(ticket)
    }

    /// Load a ticket with its comments and owner. Internal comments are
    /// stripped for client callers.
    pub async fn get_by_id(&self, actor: &User, id: DbId) -> CoreResult<TicketDetail> {
        let ticket = self.find(id).await?;

        if !actor.can_access_ticket(ticket.client_id) {
            return Err(CoreError::Forbidden(
                "You do not have access to this ticket".into(),
            ));
        }

        self.hydrate(actor, ticket).await
    }

    /// One page of tickets, each hydrated like [`TicketService::get_by_id`].
    pub async fn list(
        &self,
        actor: &User,
        filter: TicketFilter,
        page: PageRequest,
    ) -> CoreResult<Page<TicketDetail>> {
        let filter = effective_filter(actor, filter);
        let Page {
            data,
            total,
            page,
            total_pages,
        } = self.tickets.find_all(&filter, page).await?;

        let mut details = Vec::with_capacity(data.len());
        for ticket in data {
            details.push(self.hydrate(actor, ticket).await?);
        }

        Ok(Page {
            data: details,
            total,
            page,
            total_pages,
        })
    }

    /// Edit title and/or description.
    pub async fn update(
        &self,
        actor: &User,
        id: DbId,
        input: UpdateTicketInput,
    ) -> CoreResult<Ticket> {
        let ticket = self.find(id).await?;

        if !ticket.can_be_edited_by(actor.id, actor.role) {
            return Err(CoreError::Forbidden(
                "You cannot edit this ticket".into(),
            ));
        }

        if let Some(title) = input.title.as_deref().filter(|t| !t.trim().is_empty()) {
            validate_title(title)?;
        }

        let (_, changes) = ticket.update_details(
            input.title.as_deref(),
            input.description.as_deref(),
            Utc::now(),
        );

        let updated = self
            .tickets
            .update(id, &changes)
            .await?
            .ok_or_else(|| CoreError::not_found("Ticket", id))?;

        tracing::info!(ticket_id = %id, user_id = %actor.id, "Ticket updated");
        Ok(updated)
    }

    /// Admin-only hard delete; comments go with the ticket.
    pub async fn delete(&self, actor: &User, id: DbId) -> CoreResult<()> {
        if !Ticket::can_be_deleted_by(actor.role) {
            return Err(CoreError::Forbidden(
                "Only administrators can delete tickets".into(),
            ));
        }

        self.find(id).await?;

        if !self.tickets.delete(id).await? {
            return Err(CoreError::not_found("Ticket", id));
        }

        tracing::info!(ticket_id = %id, user_id = %actor.id, "Ticket deleted");
        Ok(())
    }

    /// Move a ticket to `status`. Any status may follow any other.
    pub async fn change_status(
        &self,
        actor: &User,
        id: DbId,
        status: TicketStatus,
    ) -> CoreResult<Ticket> {
        if !actor.can_manage_all_tickets() {
            return Err(CoreError::Forbidden(
                "Only support staff can change ticket status".into(),
            ));
        }

        let ticket = self.find(id).await?;
        let (_, changes) = ticket.change_status(status, Utc::now());

        let updated = self
            .tickets
            .update(id, &changes)
            .await?
            .ok_or_else(|| CoreError::not_found("Ticket", id))?;

        tracing::info!(
            ticket_id = %id,
            from = %ticket.status,
            to = %status,
            user_id = %actor.id,
            "Ticket status changed"
        );

        self.notifications.submit(NotificationJob::StatusChanged {
            client_id: updated.client_id,
            ticket_id: updated.id,
            status: updated.status,
        });

        Ok(updated)
    }

    /// Attach comments and the owner summary. Internal comments are dropped
    /// for client callers.
    async fn hydrate(&self, actor: &User, ticket: Ticket) -> CoreResult<TicketDetail> {
        let mut comments = self.comments.find_by_ticket(ticket.id).await?;
        if actor.is_client() {
            comments.retain(|c| !c.comment.is_internal);
        }

        let created_by = self
            .users
            .find_by_id(ticket.client_id)
            .await?
            .map(|u| u.summary());

        Ok(TicketDetail {
            ticket,
            comments,
            created_by,
        })
    }

    async fn find(&self, id: DbId) -> CoreResult<Ticket> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Ticket", id))
    }
}
