use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::ports::{TicketStore, UserStore};
use crate::ticket::TicketStatus;
use crate::user::User;

/// Aggregate numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_tickets: i64,
    pub total_users: i64,
    /// Every status is present, zero when no ticket holds it.
    pub tickets_by_status: BTreeMap<TicketStatus, i64>,
}

pub struct ReportService {
    tickets: Arc<dyn TicketStore>,
    users: Arc<dyn UserStore>,
}

impl ReportService {
    pub fn new(tickets: Arc<dyn TicketStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tickets, users }
    }

    pub async fn dashboard_stats(&self, actor: &User) -> CoreResult<DashboardStats> {
        if !actor.can_view_reports() {
            return Err(CoreError::Forbidden(
                "Only administrators can view reports".into(),
            ));
        }

        let counts = self.tickets.count_by_status().await?;
        let tickets_by_status: BTreeMap<TicketStatus, i64> = TicketStatus::ALL
            .into_iter()
            .map(|status| (status, counts.get(&status).copied().unwrap_or(0)))
            .collect();

        let total_tickets = tickets_by_status.values().sum();
        let total_users = self.users.count().await?;

        Ok(DashboardStats {
            total_tickets,
            total_users,
            tickets_by_status,
        })
    }
}
