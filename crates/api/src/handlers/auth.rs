//! Handlers for the `/auth` resource (login, refresh).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use helpdesk_core::services::auth::{LoginInput, LoginOutput, RefreshOutput};

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns the user plus access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginOutput>>> {
    let output = state
        .auth
        .login(LoginInput {
            email: input.email,
            password: input.password,
        })
        .await?;

    tracing::info!(user_id = %output.user.id, role = %output.user.role, "User logged in");
    Ok(Json(DataResponse { data: output }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RefreshRequest>,
) -> AppResult<Json<DataResponse<RefreshOutput>>> {
    let output = state.auth.refresh(&input.refresh_token).await?;
    Ok(Json(DataResponse { data: output }))
}
