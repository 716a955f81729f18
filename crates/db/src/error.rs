//! Mapping from sqlx failures to domain errors.

use helpdesk_core::error::CoreError;

/// Convert a sqlx error into a [`CoreError`].
///
/// - Unique violations on `uq_` constraints become `Conflict`.
/// - Everything else becomes `Internal`; the detail is logged, not exposed.
pub fn to_core_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("Database error: {err}"))
}
