//! Handlers for the `/reports` resource.

use axum::extract::State;
use axum::Json;

use helpdesk_core::services::reports::DashboardStats;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/summary
///
/// Admin only.
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = state.reports.dashboard_stats(&user).await?;
    Ok(Json(DataResponse { data: stats }))
}
