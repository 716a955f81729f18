//! Repository for the `tickets` table.

use helpdesk_core::ticket::{TicketChanges, TicketFilter};
use helpdesk_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::models::ticket::{StatusCountRow, TicketRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, client_id, \
                       created_at, updated_at, resolved_at";

/// Provides CRUD and reporting queries for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        status: &str,
        client_id: DbId,
    ) -> Result<TicketRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (title, description, status, client_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(title)
            .bind(description)
            .bind(status)
            .bind(client_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TicketRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets matching `filter`, newest first, with the total match count.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TicketRow>, i64), sqlx::Error> {
        let (where_clause, param_idx) = where_clause(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM tickets {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );
        let rows = bind_filter(sqlx::query_as::<_, TicketRow>(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM tickets {where_clause}");
        let (total,) = bind_filter(sqlx::query_as::<_, (i64,)>(&count_query), filter)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Apply a change set. `resolved_at` is only written while still NULL.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &TicketChanges,
    ) -> Result<Option<TicketRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                resolved_at = COALESCE(resolved_at, $5),
                updated_at = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(id)
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.resolved_at)
            .bind(changes.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a ticket and its comments in one transaction.
    ///
    /// Returns `true` if the ticket existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE ticket_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ticket counts grouped by status. Statuses with no tickets are absent.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCountRow>, sqlx::Error> {
        sqlx::query_as::<_, StatusCountRow>(
            "SELECT status, COUNT(*) AS count FROM tickets GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_client(pool: &PgPool, client_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(pool)
            .await
    }
}

/// Build the `WHERE` clause for `filter`. Returns the clause and the next
/// free positional parameter index.
fn where_clause(filter: &TicketFilter) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx: usize = 1;

    if filter.status.is_some() {
        conditions.push(format!("status = ${param_idx}"));
        param_idx += 1;
    }
    if filter.client_id.is_some() {
        conditions.push(format!("client_id = ${param_idx}"));
        param_idx += 1;
    }
    if filter.created_from.is_some() {
        conditions.push(format!("created_at >= ${param_idx}"));
        param_idx += 1;
    }
    if filter.created_to.is_some() {
        conditions.push(format!("created_at <= ${param_idx}"));
        param_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, param_idx)
}

/// Bind filter values in the same order [`where_clause`] numbered them.
fn bind_filter<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &TicketFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    if let Some(status) = filter.status {
        q = q.bind(status.as_str());
    }
    if let Some(client_id) = filter.client_id {
        q = q.bind(client_id);
    }
    if let Some(from) = filter.created_from {
        q = q.bind(from);
    }
    if let Some(to) = filter.created_to {
        q = q.bind(to);
    }
    q
}
