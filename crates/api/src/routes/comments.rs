//! Route definitions for the `/comments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// POST /   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(comments::create))
}
