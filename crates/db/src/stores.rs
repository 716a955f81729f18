//! Store port implementations backed by PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use helpdesk_core::comment::{Comment, CommentWithAuthor, NewComment};
use helpdesk_core::email::Email;
use helpdesk_core::error::CoreResult;
use helpdesk_core::pagination::{Page, PageRequest};
use helpdesk_core::ports::{CommentStore, TicketStore, UserStore};
use helpdesk_core::roles::Role;
use helpdesk_core::ticket::{NewTicket, Ticket, TicketChanges, TicketFilter, TicketStatus};
use helpdesk_core::types::DbId;
use helpdesk_core::user::{NewUser, User, UserChanges};

use crate::error::to_core_error;
use crate::repositories::{CommentRepo, TicketRepo, UserRepo};
use crate::DbPool;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, input: NewUser) -> CoreResult<User> {
        UserRepo::create(
            &self.pool,
            &input.name,
            input.email.as_str(),
            input.password_hash.as_str(),
            input.role.as_str(),
        )
        .await
        .map_err(to_core_error)?
        .into_domain()
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<User>> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(to_core_error)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> CoreResult<Option<User>> {
        UserRepo::find_by_email(&self.pool, email.as_str())
            .await
            .map_err(to_core_error)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn find_all(&self, role: Option<Role>) -> CoreResult<Vec<User>> {
        UserRepo::list(&self.pool, role.map(Role::as_str))
            .await
            .map_err(to_core_error)?
            .into_iter()
            .map(|row| row.into_domain())
            .collect()
    }

    async fn update(&self, id: DbId, changes: &UserChanges) -> CoreResult<Option<User>> {
        UserRepo::update(
            &self.pool,
            id,
            changes.name.as_deref(),
            changes.email.as_ref().map(Email::as_str),
            changes.password_hash.as_ref().map(|h| h.as_str()),
        )
        .await
        .map_err(to_core_error)?
        .map(|row| row.into_domain())
        .transpose()
    }

    async fn delete(&self, id: DbId) -> CoreResult<bool> {
        UserRepo::delete(&self.pool, id).await.map_err(to_core_error)
    }

    async fn count(&self) -> CoreResult<i64> {
        UserRepo::count(&self.pool).await.map_err(to_core_error)
    }
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgTicketStore {
    pool: DbPool,
}

impl PgTicketStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn create(&self, input: NewTicket) -> CoreResult<Ticket> {
        TicketRepo::create(
            &self.pool,
            &input.title,
            &input.description,
            input.status.as_str(),
            input.client_id,
        )
        .await
        .map_err(to_core_error)?
        .into_domain()
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Ticket>> {
        TicketRepo::find_by_id(&self.pool, id)
            .await
            .map_err(to_core_error)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn find_all(&self, filter: &TicketFilter, page: PageRequest) -> CoreResult<Page<Ticket>> {
        let (rows, total) = TicketRepo::list_filtered(&self.pool, filter, page.limit, page.offset())
            .await
            .map_err(to_core_error)?;
        let data = rows
            .into_iter()
            .map(|row| row.into_domain())
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Page::new(data, total, page))
    }

    async fn update(&self, id: DbId, changes: &TicketChanges) -> CoreResult<Option<Ticket>> {
        TicketRepo::update(&self.pool, id, changes)
            .await
            .map_err(to_core_error)?
            .map(|row| row.into_domain())
            .transpose()
    }

    async fn delete(&self, id: DbId) -> CoreResult<bool> {
        TicketRepo::delete(&self.pool, id).await.map_err(to_core_error)
    }

    async fn count_by_status(&self) -> CoreResult<BTreeMap<TicketStatus, i64>> {
        let rows = TicketRepo::count_by_status(&self.pool)
            .await
            .map_err(to_core_error)?;
        rows.into_iter()
            .map(|row| -> CoreResult<(TicketStatus, i64)> {
                Ok((row.status.parse()?, row.count))
            })
            .collect()
    }

    async fn count_by_client(&self, client_id: DbId) -> CoreResult<i64> {
        TicketRepo::count_by_client(&self.pool, client_id)
            .await
            .map_err(to_core_error)
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgCommentStore {
    pool: DbPool,
}

impl PgCommentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn create(&self, input: NewComment) -> CoreResult<Comment> {
        let row = CommentRepo::create(
            &self.pool,
            input.ticket_id,
            input.user_id,
            &input.content,
            input.is_internal,
        )
        .await
        .map_err(to_core_error)?;
        Ok(row.into())
    }

    async fn find_by_ticket(&self, ticket_id: DbId) -> CoreResult<Vec<CommentWithAuthor>> {
        CommentRepo::list_for_ticket(&self.pool, ticket_id)
            .await
            .map_err(to_core_error)?
            .into_iter()
            .map(|row| row.into_domain())
            .collect()
    }
}
