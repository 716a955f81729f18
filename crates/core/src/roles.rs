//! User roles and the capabilities derived from them.
//!
//! Role names must match the `users.role` CHECK constraint in
//! `20250101000001_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPPORT: &str = "support";
pub const ROLE_CLIENT: &str = "client";

/// The closed set of roles a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Support,
    Client,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Support, Role::Client];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Support => ROLE_SUPPORT,
            Role::Client => ROLE_CLIENT,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn is_support(self) -> bool {
        self == Role::Support
    }

    pub fn is_client(self) -> bool {
        self == Role::Client
    }

    /// Staff roles see and triage every ticket.
    pub fn can_manage_all_tickets(self) -> bool {
        matches!(self, Role::Admin | Role::Support)
    }

    pub fn can_view_reports(self) -> bool {
        self.is_admin()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUPPORT => Ok(Role::Support),
            ROLE_CLIENT => Ok(Role::Client),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {ROLE_ADMIN}, {ROLE_SUPPORT}, {ROLE_CLIENT}"
            ))),
        }
    }
}
