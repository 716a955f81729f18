//! Repository for the `comments` table.

use helpdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{CommentRow, CommentWithAuthorRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ticket_id, user_id, content, is_internal, created_at";

/// Comments are append-only; there is no update or single-row delete.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        pool: &PgPool,
        ticket_id: DbId,
        user_id: DbId,
        content: &str,
        is_internal: bool,
    ) -> Result<CommentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (ticket_id, user_id, content, is_internal)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(ticket_id)
            .bind(user_id)
            .bind(content)
            .bind(is_internal)
            .fetch_one(pool)
            .await
    }

    /// All comments on a ticket with their authors, oldest first.
    pub async fn list_for_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<CommentWithAuthorRow>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthorRow>(
            "SELECT c.id, c.ticket_id, c.user_id, c.content, c.is_internal, c.created_at,
                    u.name AS author_name, u.email AS author_email, u.role AS author_role
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.ticket_id = $1
             ORDER BY c.created_at ASC",
        )
        .bind(ticket_id)
        .fetch_all(pool)
        .await
    }
}
