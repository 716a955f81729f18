//! Row models for the `comments` table.

use helpdesk_core::comment::{Comment, CommentWithAuthor};
use helpdesk_core::email::Email;
use helpdesk_core::error::CoreError;
use helpdesk_core::roles::Role;
use helpdesk_core::types::{DbId, Timestamp};
use helpdesk_core::user::UserSummary;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: DbId,
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub is_internal: bool,
    pub created_at: Timestamp,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            ticket_id: row.ticket_id,
            user_id: row.user_id,
            content: row.content,
            is_internal: row.is_internal,
            created_at: row.created_at,
        }
    }
}

/// A comment joined with `users` for its author.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorRow {
    pub id: DbId,
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub is_internal: bool,
    pub created_at: Timestamp,
    pub author_name: String,
    pub author_email: String,
    pub author_role: String,
}

impl CommentWithAuthorRow {
    pub fn into_domain(self) -> Result<CommentWithAuthor, CoreError> {
        let email = Email::parse(&self.author_email).map_err(|_| {
            CoreError::Internal(format!("User {} has a malformed stored email", self.user_id))
        })?;
        let role = self
            .author_role
            .parse::<Role>()
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        Ok(CommentWithAuthor {
            author: UserSummary {
                id: self.user_id,
                name: self.author_name,
                email,
                role,
            },
            comment: Comment {
                id: self.id,
                ticket_id: self.ticket_id,
                user_id: self.user_id,
                content: self.content,
                is_internal: self.is_internal,
                created_at: self.created_at,
            },
        })
    }
}
