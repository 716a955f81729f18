//! Handlers for the `/tickets` resource.

use std::borrow::Cow;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use helpdesk_core::error::CoreError;
use helpdesk_core::pagination::Page;
use helpdesk_core::services::tickets::{CreateTicketInput, UpdateTicketInput};
use helpdesk_core::ticket::{Ticket, TicketDetail, TicketStatus};
use helpdesk_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::query::TicketListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tickets`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
}

/// Request body for `PUT /tickets/{id}`. Blank fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTicketRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_optional_description"))]
    pub description: Option<String>,
}

/// Request body for `PATCH /tickets/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeStatusRequest {
    pub status: TicketStatus,
}

fn validate_optional_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if title.trim().is_empty() || (5..=200).contains(&len) {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(Cow::Borrowed(
        "Title must be between 5 and 200 characters",
    )))
}

fn validate_optional_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() || description.chars().count() >= 10 {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(Cow::Borrowed(
        "Description must be at least 10 characters",
    )))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets
///
/// Paginated, newest first, each ticket with its comments. Clients only ever
/// see their own tickets.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    params: Result<Query<TicketListParams>, QueryRejection>,
) -> AppResult<Json<Page<TicketDetail>>> {
    let Query(params) =
        params.map_err(|e| AppError::Core(CoreError::Validation(e.body_text())))?;

    let page = state
        .tickets
        .list(&user, params.filter(), params.page_request())
        .await?;
    Ok(Json(page))
}

/// POST /api/v1/tickets
///
/// The caller becomes the ticket's owner.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(input): ValidJson<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Ticket>>)> {
    let ticket = state
        .tickets
        .create(
            &user,
            CreateTicketInput {
                title: input.title,
                description: input.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketDetail>>> {
    let detail = state.tickets.get_by_id(&user, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/tickets/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateTicketRequest>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = state
        .tickets
        .update(
            &user,
            id,
            UpdateTicketInput {
                title: input.title,
                description: input.description,
            },
        )
        .await?;
    Ok(Json(DataResponse { data: ticket }))
}

/// DELETE /api/v1/tickets/{id}
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.tickets.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/tickets/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<ChangeStatusRequest>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = state.tickets.change_status(&user, id, input.status).await?;
    Ok(Json(DataResponse { data: ticket }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(title: Option<&str>, description: Option<&str>) -> UpdateTicketRequest {
        UpdateTicketRequest {
            title: title.map(String::from),
            description: description.map(String::from),
        }
    }

    #[test]
    fn blank_update_fields_pass_validation() {
        assert!(update(Some(""), Some("  ")).validate().is_ok());
        assert!(update(None, None).validate().is_ok());
    }

    #[test]
    fn short_update_fields_fail_validation() {
        assert!(update(Some("abc"), None).validate().is_err());
        assert!(update(None, Some("too short")).validate().is_err());
        assert!(update(Some(&"x".repeat(201)), None).validate().is_err());
    }

    #[test]
    fn create_request_enforces_lengths() {
        let ok = CreateTicketRequest {
            title: "Printer jam".into(),
            description: "Paper stuck in tray two".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateTicketRequest {
            title: "Hey".into(),
            description: "short".into(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));
    }
}
