//! Ticket comments. Immutable once written.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::user::UserSummary;

pub const MAX_CONTENT_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub content: String,
    /// Staff-only note, hidden from the ticket's client.
    pub is_internal: bool,
    pub created_at: Timestamp,
}

/// A comment joined with its author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: UserSummary,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub is_internal: bool,
}

/// Content must be 1 to [`MAX_CONTENT_LENGTH`] characters and not only whitespace.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Comment content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment content exceeds maximum length of {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}
