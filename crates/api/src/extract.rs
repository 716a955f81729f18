//! Body extractor that deserializes and validates in one step.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use helpdesk_core::error::CoreError;

use crate::error::AppError;

/// JSON request body that has passed its `validator` rules.
///
/// Well-formed JSON with the wrong shape (missing fields, unknown enum values,
/// malformed UUIDs) is reported as a validation error. Syntax errors and a
/// missing `Content-Type` are plain bad requests.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => {
                    AppError::Core(CoreError::Validation(e.body_text()))
                }
                other => AppError::BadRequest(other.body_text()),
            })?;

        value.validate()?;
        Ok(ValidJson(value))
    }
}
