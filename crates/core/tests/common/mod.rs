//! In-memory port implementations shared by the service tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use helpdesk_core::comment::{Comment, CommentWithAuthor, NewComment};
use helpdesk_core::email::Email;
use helpdesk_core::error::{CoreError, CoreResult};
use helpdesk_core::notify::{NotificationJob, NotificationQueue};
use helpdesk_core::pagination::{Page, PageRequest};
use helpdesk_core::password::PasswordHash;
use helpdesk_core::ports::{
    CommentStore, CredentialComparator, TicketStore, TokenPayload, TokenService, UserStore,
};
use helpdesk_core::roles::Role;
use helpdesk_core::services::{AuthService, CommentService, ReportService, TicketService};
use helpdesk_core::ticket::{NewTicket, Ticket, TicketChanges, TicketFilter, TicketStatus};
use helpdesk_core::types::DbId;
use helpdesk_core::user::{NewUser, User, UserChanges};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user(role: Role, email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: email.split('@').next().unwrap_or("user").to_string(),
        email: Email::parse(email).unwrap(),
        password_hash: PasswordHash::new(format!("hashed:{email}-pw")),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn ticket_for(client: &User, status: TicketStatus) -> Ticket {
    let created = Utc::now() - Duration::minutes(5);
    Ticket {
        id: Uuid::new_v4(),
        title: "Cannot log in".into(),
        description: "The login page spins forever".into(),
        status,
        client_id: client.id,
        created_at: created,
        updated_at: created,
        resolved_at: None,
    }
}

// ---------------------------------------------------------------------------
// MemoryDb: implements every store port over shared vectors
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryDb {
    pub users: Mutex<Vec<User>>,
    pub tickets: Mutex<Vec<Ticket>>,
    pub comments: Mutex<Vec<Comment>>,
    pub last_filter: Mutex<Option<TicketFilter>>,
}

impl MemoryDb {
    pub fn add_user(&self, user: User) -> User {
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn add_ticket(&self, ticket: Ticket) -> Ticket {
        self.tickets.lock().unwrap().push(ticket.clone());
        ticket
    }

    pub fn add_comment(&self, ticket: &Ticket, author: &User, content: &str, is_internal: bool) {
        self.comments.lock().unwrap().push(Comment {
            id: Uuid::new_v4(),
            ticket_id: ticket.id,
            user_id: author.id,
            content: content.into(),
            is_internal,
            created_at: Utc::now(),
        });
    }

    pub fn ticket(&self, id: DbId) -> Option<Ticket> {
        self.tickets.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    pub fn comment_count(&self, ticket_id: DbId) -> usize {
        self.comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn create(&self, input: NewUser) -> CoreResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        Ok(self.add_user(user))
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> CoreResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_all(&self, role: Option<Role>) -> CoreResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect())
    }

    async fn update(&self, id: DbId, changes: &UserChanges) -> CoreResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: DbId) -> CoreResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn count(&self) -> CoreResult<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl TicketStore for MemoryDb {
    async fn create(&self, input: NewTicket) -> CoreResult<Ticket> {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status,
            client_id: input.client_id,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };
        Ok(self.add_ticket(ticket))
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Ticket>> {
        Ok(self.ticket(id))
    }

    async fn find_all(&self, filter: &TicketFilter, page: PageRequest) -> CoreResult<Page<Ticket>> {
        *self.last_filter.lock().unwrap() = Some(filter.clone());

        let mut matching: Vec<Ticket> = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.client_id.is_none_or(|c| t.client_id == c))
            .filter(|t| filter.created_from.is_none_or(|from| t.created_at >= from))
            .filter(|t| filter.created_to.is_none_or(|to| t.created_at <= to))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok(Page::new(data, total, page))
    }

    async fn update(&self, id: DbId, changes: &TicketChanges) -> CoreResult<Option<Ticket>> {
        let mut tickets = self.tickets.lock().unwrap();
        let Some(slot) = tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        *slot = slot.apply(changes);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: DbId) -> CoreResult<bool> {
        self.comments.lock().unwrap().retain(|c| c.ticket_id != id);
        let mut tickets = self.tickets.lock().unwrap();
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        Ok(tickets.len() < before)
    }

    async fn count_by_status(&self) -> CoreResult<BTreeMap<TicketStatus, i64>> {
        let mut counts = BTreeMap::new();
        for t in self.tickets.lock().unwrap().iter() {
            *counts.entry(t.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_by_client(&self, client_id: DbId) -> CoreResult<i64> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.client_id == client_id)
            .count() as i64)
    }
}

#[async_trait]
impl CommentStore for MemoryDb {
    async fn create(&self, input: NewComment) -> CoreResult<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            ticket_id: input.ticket_id,
            user_id: input.user_id,
            content: input.content,
            is_internal: input.is_internal,
            created_at: Utc::now(),
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn find_by_ticket(&self, ticket_id: DbId) -> CoreResult<Vec<CommentWithAuthor>> {
        let users = self.users.lock().unwrap();
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .filter_map(|c| {
                users.iter().find(|u| u.id == c.user_id).map(|author| CommentWithAuthor {
                    comment: c.clone(),
                    author: author.summary(),
                })
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Credentials and tokens
// ---------------------------------------------------------------------------

/// Digest is `hashed:<plaintext>`.
pub struct PlainCredentials;

#[async_trait]
impl CredentialComparator for PlainCredentials {
    async fn hash(&self, plaintext: &str) -> CoreResult<PasswordHash> {
        Ok(PasswordHash::new(format!("hashed:{plaintext}")))
    }

    async fn compare(&self, plaintext: &str, digest: &PasswordHash) -> CoreResult<bool> {
        Ok(digest.as_str() == format!("hashed:{plaintext}"))
    }
}

/// Tokens are `<kind>|<user_id>|<email>|<role>`.
pub struct PlainTokens;

impl PlainTokens {
    fn encode(kind: &str, payload: &TokenPayload) -> String {
        format!("{kind}|{}|{}|{}", payload.user_id, payload.email, payload.role)
    }

    fn decode(kind: &str, token: &str) -> CoreResult<TokenPayload> {
        let bad = || CoreError::Unauthorized("malformed token".into());
        let parts: Vec<&str> = token.split('|').collect();
        match parts.as_slice() {
            [k, id, email, role] if *k == kind => Ok(TokenPayload {
                user_id: id.parse().map_err(|_| bad())?,
                email: email.to_string(),
                role: role.parse().map_err(|_| bad())?,
            }),
            _ => Err(bad()),
        }
    }
}

impl TokenService for PlainTokens {
    fn generate_access_token(&self, payload: &TokenPayload) -> CoreResult<String> {
        Ok(Self::encode("access", payload))
    }

    fn generate_refresh_token(&self, payload: &TokenPayload) -> CoreResult<String> {
        Ok(Self::encode("refresh", payload))
    }

    fn verify_access_token(&self, token: &str) -> CoreResult<TokenPayload> {
        Self::decode("access", token)
    }

    fn verify_refresh_token(&self, token: &str) -> CoreResult<TokenPayload> {
        Self::decode("refresh", token)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// All services wired against one [`MemoryDb`], plus the notification receiver.
pub struct Harness {
    pub db: Arc<MemoryDb>,
    pub auth: AuthService,
    pub tickets: TicketService,
    pub comments: CommentService,
    pub reports: ReportService,
    pub notifications: UnboundedReceiver<NotificationJob>,
}

impl Harness {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDb::default());
        let (queue, notifications) = NotificationQueue::new();

        Self {
            auth: AuthService::new(db.clone(), Arc::new(PlainCredentials), Arc::new(PlainTokens)),
            tickets: TicketService::new(db.clone(), db.clone(), db.clone(), queue.clone()),
            comments: CommentService::new(db.clone(), db.clone(), queue),
            reports: ReportService::new(db.clone(), db.clone()),
            db,
            notifications,
        }
    }

    pub fn drain_notifications(&mut self) -> Vec<NotificationJob> {
        let mut jobs = Vec::new();
        while let Ok(job) = self.notifications.try_recv() {
            jobs.push(job);
        }
        jobs
    }
}
