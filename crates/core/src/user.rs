//! User identity and the per-user capability checks.

use serde::Serialize;

use crate::email::Email;
use crate::password::PasswordHash;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// A registered user. The role is fixed at creation.
///
/// Deliberately not `Serialize`: use [`UserSummary`] for anything that
/// leaves the process.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_support(&self) -> bool {
        self.role.is_support()
    }

    pub fn is_client(&self) -> bool {
        self.role.is_client()
    }

    pub fn can_manage_all_tickets(&self) -> bool {
        self.role.can_manage_all_tickets()
    }

    /// Staff can access any ticket; everyone else only their own.
    pub fn can_access_ticket(&self, owner_id: DbId) -> bool {
        self.can_manage_all_tickets() || self.id == owner_id
    }

    pub fn can_view_reports(&self) -> bool {
        self.role.can_view_reports()
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Credential-free projection of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

/// DTO for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
}

/// Partial update for a user. The role is intentionally absent.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<PasswordHash>,
}
