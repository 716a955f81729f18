//! Row model for the `users` table.

use helpdesk_core::email::Email;
use helpdesk_core::error::CoreError;
use helpdesk_core::password::PasswordHash;
use helpdesk_core::roles::Role;
use helpdesk_core::types::{DbId, Timestamp};
use helpdesk_core::user::User;
use sqlx::FromRow;

/// Full user row. Contains the password hash; convert with
/// [`UserRow::into_domain`] before use.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRow {
    pub fn into_domain(self) -> Result<User, CoreError> {
        let email = Email::parse(&self.email).map_err(|_| {
            CoreError::Internal(format!("User {} has a malformed stored email", self.id))
        })?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        Ok(User {
            id: self.id,
            name: self.name,
            email,
            password_hash: PasswordHash::new(self.password_hash),
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
