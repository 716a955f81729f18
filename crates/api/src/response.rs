//! Shared response envelope types for API handlers.
//!
//! Single-resource responses use a `{ "data": ... }` envelope. Paginated lists
//! serialize [`Page`](helpdesk_core::pagination::Page) directly, which already
//! carries `data` alongside its totals.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: ticket }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
