//! Handlers for the `/comments` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use helpdesk_core::comment::Comment;
use helpdesk_core::services::comments::CreateCommentInput;
use helpdesk_core::types::DbId;

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /comments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub ticket_id: DbId,
    #[validate(length(min = 1, max = 1000, message = "Content must be between 1 and 1000 characters"))]
    pub content: String,
    #[serde(default)]
    pub is_internal: bool,
}

/// POST /api/v1/comments
///
/// Staff only. Non-internal comments notify the ticket's client.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(input): ValidJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let comment = state
        .comments
        .create(
            &user,
            CreateCommentInput {
                ticket_id: input.ticket_id,
                content: input.content,
                is_internal: input.is_internal,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
