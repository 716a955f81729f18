//! Ticket lifecycle: statuses, edit/delete rules, and change sets.
//!
//! Tickets are immutable values. Every mutation returns the updated ticket
//! together with a [`TicketChanges`] describing exactly which columns moved,
//! so the store is the only place where changes are applied.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::comment::CommentWithAuthor;
use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};
use crate::user::UserSummary;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CLOSED: &str = "closed";

/// Ticket status. Declaration order is the usual lifecycle order, but any
/// status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Pending,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Pending => STATUS_PENDING,
            TicketStatus::InProgress => STATUS_IN_PROGRESS,
            TicketStatus::Resolved => STATUS_RESOLVED,
            TicketStatus::Closed => STATUS_CLOSED,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid ticket status '{s}'. Must be one of: {STATUS_PENDING}, \
                     {STATUS_IN_PROGRESS}, {STATUS_RESOLVED}, {STATUS_CLOSED}"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate a ticket title: non-blank and at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Ticket title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Ticket title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Ticket description must not be empty".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    /// Owning client. Never changes after creation.
    pub client_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Set the first time the ticket reaches `resolved`; never cleared.
    pub resolved_at: Option<Timestamp>,
}

/// The columns touched by a single ticket mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub resolved_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl TicketChanges {
    fn touch(updated_at: Timestamp) -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            resolved_at: None,
            updated_at,
        }
    }
}

impl Ticket {
    /// Set `status` unconditionally.
    ///
    /// `resolved_at` is stamped only when moving to `resolved` for the first
    /// time. No transition is rejected.
    pub fn change_status(&self, status: TicketStatus, now: Timestamp) -> (Ticket, TicketChanges) {
        let mut changes = TicketChanges::touch(self.next_updated_at(now));
        changes.status = Some(status);
        if status == TicketStatus::Resolved && self.resolved_at.is_none() {
            changes.resolved_at = Some(changes.updated_at);
        }
        (self.apply(&changes), changes)
    }

    /// Replace title and/or description. Blank values leave the field as is.
    pub fn update_details(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        now: Timestamp,
    ) -> (Ticket, TicketChanges) {
        let mut changes = TicketChanges::touch(self.next_updated_at(now));
        changes.title = title
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        changes.description = description
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string);
        (self.apply(&changes), changes)
    }

    /// Staff may always edit; the owning client only while the ticket is pending.
    pub fn can_be_edited_by(&self, user_id: DbId, role: Role) -> bool {
        if role.can_manage_all_tickets() {
            return true;
        }
        self.client_id == user_id && self.status == TicketStatus::Pending
    }

    pub fn can_be_deleted_by(role: Role) -> bool {
        role.is_admin()
    }

    /// Apply a change set to produce a new value.
    pub fn apply(&self, changes: &TicketChanges) -> Ticket {
        Ticket {
            title: changes.title.clone().unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            status: changes.status.unwrap_or(self.status),
            resolved_at: self.resolved_at.or(changes.resolved_at),
            updated_at: changes.updated_at,
            ..self.clone()
        }
    }

    // Postgres keeps microseconds, so stay at least one past the stored value.
    fn next_updated_at(&self, now: Timestamp) -> Timestamp {
        now.max(self.updated_at + Duration::microseconds(1))
    }
}

/// DTO for inserting a ticket. Only constructible in the `pending` state.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub client_id: DbId,
    pub status: TicketStatus,
}

impl NewTicket {
    pub fn pending(title: String, description: String, client_id: DbId) -> Self {
        Self {
            title,
            description,
            client_id,
            status: TicketStatus::Pending,
        }
    }
}

/// Filters accepted when listing tickets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub client_id: Option<DbId>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

/// A ticket hydrated with its comments and owning client.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub comments: Vec<CommentWithAuthor>,
    pub created_by: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            title: "Printer on fire".into(),
            description: "Smoke coming out of tray two".into(),
            status,
            client_id: Uuid::new_v4(),
            created_at: at(0),
            updated_at: at(0),
            resolved_at: None,
        }
    }

    #[test]
    fn every_transition_sets_status_and_bumps_updated_at() {
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                let t = ticket(from);
                let (next, changes) = t.change_status(to, at(10));
                assert_eq!(next.status, to);
                assert_eq!(changes.status, Some(to));
                assert!(next.updated_at > t.updated_at);
                assert_eq!(next.resolved_at.is_some(), to == TicketStatus::Resolved);
            }
        }
    }

    #[test]
    fn resolved_at_is_stamped_once() {
        let t = ticket(TicketStatus::Pending);
        let (resolved, _) = t.change_status(TicketStatus::Resolved, at(10));
        assert_eq!(resolved.resolved_at, Some(at(10)));

        let (reopened, changes) = resolved.change_status(TicketStatus::Pending, at(20));
        assert_eq!(reopened.resolved_at, Some(at(10)));
        assert_eq!(changes.resolved_at, None);

        let (again, changes) = reopened.change_status(TicketStatus::Resolved, at(30));
        assert_eq!(again.resolved_at, Some(at(10)));
        assert_eq!(changes.resolved_at, None);
    }

    #[test]
    fn updated_at_strictly_increases_with_stale_clock() {
        let t = ticket(TicketStatus::Pending);
        let (next, _) = t.change_status(TicketStatus::InProgress, t.updated_at);
        assert!(next.updated_at > t.updated_at);
    }

    #[test]
    fn update_details_ignores_blank_values() {
        let t = ticket(TicketStatus::Pending);
        let (next, changes) = t.update_details(Some("  "), Some("New description text"), at(5));
        assert_eq!(next.title, t.title);
        assert_eq!(next.description, "New description text");
        assert_eq!(changes.title, None);
        assert_eq!(next.status, t.status);
    }

    #[test]
    fn edit_rules() {
        let pending = ticket(TicketStatus::Pending);
        let owner = pending.client_id;
        let stranger = Uuid::new_v4();

        assert!(pending.can_be_edited_by(owner, Role::Client));
        assert!(!pending.can_be_edited_by(stranger, Role::Client));
        assert!(pending.can_be_edited_by(stranger, Role::Support));
        assert!(pending.can_be_edited_by(stranger, Role::Admin));

        for status in [TicketStatus::InProgress, TicketStatus::Resolved, TicketStatus::Closed] {
            let t = Ticket { status, ..pending.clone() };
            assert!(!t.can_be_edited_by(owner, Role::Client), "{status}");
            assert!(t.can_be_edited_by(stranger, Role::Support), "{status}");
        }
    }

    #[test]
    fn only_admin_deletes() {
        assert!(Ticket::can_be_deleted_by(Role::Admin));
        assert!(!Ticket::can_be_deleted_by(Role::Support));
        assert!(!Ticket::can_be_deleted_by(Role::Client));
    }

    #[test]
    fn status_parse_and_serde_agree() {
        for status in TicketStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), status);
        }
        assert!("reopened".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("Valid title").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }
}
