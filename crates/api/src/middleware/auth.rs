//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use helpdesk_core::error::CoreError;
use helpdesk_core::services::auth::INVALID_TOKEN;
use helpdesk_core::user::User;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a JWT Bearer token in the `Authorization` header.
///
/// The token only identifies the caller; the user is reloaded from the store on
/// every request so role changes and deletions take effect immediately.
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let payload = state
            .tokens
            .verify_access_token(token)
            .map_err(|_| AppError::Core(CoreError::Unauthorized(INVALID_TOKEN.into())))?;

        let user = state
            .users
            .find_by_id(payload.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_TOKEN.into())))?;

        Ok(AuthUser(user))
    }
}
