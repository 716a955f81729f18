//! Query parameter types for list endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use helpdesk_core::pagination::PageRequest;
use helpdesk_core::ticket::{TicketFilter, TicketStatus};
use helpdesk_core::types::DbId;

/// Query parameters for `GET /tickets`.
///
/// Dates are RFC 3339. `page` and `limit` are clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct TicketListParams {
    pub status: Option<TicketStatus>,
    pub client_id: Option<DbId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl TicketListParams {
    pub fn filter(&self) -> TicketFilter {
        TicketFilter {
            status: self.status,
            client_id: self.client_id,
            created_from: self.date_from,
            created_to: self.date_to,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_is_clamped() {
        let params = TicketListParams {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        };
        let page = params.page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn dates_map_to_created_range() {
        let from: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        let params = TicketListParams {
            status: Some(TicketStatus::Resolved),
            date_from: Some(from),
            ..Default::default()
        };
        let filter = params.filter();
        assert_eq!(filter.status, Some(TicketStatus::Resolved));
        assert_eq!(filter.created_from, Some(from));
        assert!(filter.created_to.is_none());
    }
}
