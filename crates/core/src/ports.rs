//! Port traits implemented by storage, credential, token, and delivery adapters.
//!
//! Services hold these as `Arc<dyn Trait>` and never reach for globals.
//! `async_trait` keeps the traits object-safe.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::comment::{Comment, CommentWithAuthor, NewComment};
use crate::email::Email;
use crate::error::CoreResult;
use crate::pagination::{Page, PageRequest};
use crate::password::PasswordHash;
use crate::roles::Role;
use crate::ticket::{NewTicket, Ticket, TicketChanges, TicketFilter, TicketStatus};
use crate::types::DbId;
use crate::user::{NewUser, User, UserChanges};

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: NewUser) -> CoreResult<User>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> CoreResult<Option<User>>;

    async fn find_all(&self, role: Option<Role>) -> CoreResult<Vec<User>>;

    /// Returns `None` if no user has `id`.
    async fn update(&self, id: DbId, changes: &UserChanges) -> CoreResult<Option<User>>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> CoreResult<bool>;

    async fn count(&self) -> CoreResult<i64>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn create(&self, input: NewTicket) -> CoreResult<Ticket>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Ticket>>;

    /// Newest first.
    async fn find_all(&self, filter: &TicketFilter, page: PageRequest) -> CoreResult<Page<Ticket>>;

    /// Returns `None` if the ticket no longer exists.
    async fn update(&self, id: DbId, changes: &TicketChanges) -> CoreResult<Option<Ticket>>;

    /// Removes the ticket and its comments. Returns `true` if the ticket existed.
    async fn delete(&self, id: DbId) -> CoreResult<bool>;

    /// Ticket counts per status. Statuses with no tickets may be absent.
    async fn count_by_status(&self) -> CoreResult<BTreeMap<TicketStatus, i64>>;

    async fn count_by_client(&self, client_id: DbId) -> CoreResult<i64>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, input: NewComment) -> CoreResult<Comment>;

    /// Oldest first.
    async fn find_by_ticket(&self, ticket_id: DbId) -> CoreResult<Vec<CommentWithAuthor>>;
}

// ---------------------------------------------------------------------------
// Credentials and tokens
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CredentialComparator: Send + Sync {
    async fn hash(&self, plaintext: &str) -> CoreResult<PasswordHash>;

    /// `Ok(false)` on mismatch. Errors only for unusable digests.
    async fn compare(&self, plaintext: &str, digest: &PasswordHash) -> CoreResult<bool>;
}

/// Identity carried inside access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub user_id: DbId,
    pub email: String,
    pub role: Role,
}

impl From<&User> for TokenPayload {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.to_string(),
            role: user.role,
        }
    }
}

pub trait TokenService: Send + Sync {
    fn generate_access_token(&self, payload: &TokenPayload) -> CoreResult<String>;

    fn generate_refresh_token(&self, payload: &TokenPayload) -> CoreResult<String>;

    fn verify_access_token(&self, token: &str) -> CoreResult<TokenPayload>;

    fn verify_refresh_token(&self, token: &str) -> CoreResult<TokenPayload>;
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_ticket_created(&self, to: &Email, ticket_id: DbId, title: &str) -> CoreResult<()>;

    async fn send_ticket_status_changed(
        &self,
        to: &Email,
        ticket_id: DbId,
        status: TicketStatus,
    ) -> CoreResult<()>;

    async fn send_ticket_response(&self, to: &Email, ticket_id: DbId, response: &str) -> CoreResult<()>;
}
