pub mod auth;
pub mod comments;
pub mod health;
pub mod reports;
pub mod tickets;

use axum::http::Uri;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
///
/// /tickets                     list, create
/// /tickets/{id}                get, update, delete (admin)
/// /tickets/{id}/status         change status (staff)
///
/// /comments                    create (staff)
///
/// /reports/summary             dashboard stats (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tickets", tickets::router())
        .nest("/comments", comments::router())
        .nest("/reports", reports::router())
}

/// Fallback for unmatched paths, so 404s carry the usual JSON error body.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
