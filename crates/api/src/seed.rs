//! Demo account seeding for local development.

use helpdesk_core::email::Email;
use helpdesk_core::error::CoreResult;
use helpdesk_core::password::validate_password_strength;
use helpdesk_core::ports::{CredentialComparator, UserStore};
use helpdesk_core::roles::Role;
use helpdesk_core::user::NewUser;

/// A demo account created by the seed command.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 6] = [
    DemoAccount {
        name: "Administrador",
        email: "admin@test.com",
        password: "admin123",
        role: Role::Admin,
    },
    DemoAccount {
        name: "Soporte Técnico",
        email: "soporte@test.com",
        password: "soporte123",
        role: Role::Support,
    },
    DemoAccount {
        name: "Cliente Juan",
        email: "juan@test.com",
        password: "juan123",
        role: Role::Client,
    },
    DemoAccount {
        name: "Cliente María",
        email: "maria@test.com",
        password: "maria123",
        role: Role::Client,
    },
    DemoAccount {
        name: "Cliente Luis",
        email: "luis@test.com",
        password: "luis123",
        role: Role::Client,
    },
    DemoAccount {
        name: "Cliente Pedro",
        email: "pedro@test.com",
        password: "pedro123",
        role: Role::Client,
    },
];

/// Outcome of a seed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Insert every demo account whose email is not taken yet.
///
/// `password_override`, when given, replaces every demo password and must pass
/// [`validate_password_strength`].
pub async fn seed_demo_accounts(
    users: &dyn UserStore,
    credentials: &dyn CredentialComparator,
    password_override: Option<&str>,
) -> CoreResult<SeedReport> {
    if let Some(password) = password_override {
        validate_password_strength(password)?;
    }

    let mut report = SeedReport::default();

    for account in DEMO_ACCOUNTS {
        let email = Email::parse(account.email)?;

        if users.find_by_email(&email).await?.is_some() {
            tracing::info!(email = %email, "Demo account already exists, skipping");
            report.skipped.push(email.into_inner());
            continue;
        }

        let password_hash = credentials
            .hash(password_override.unwrap_or(account.password))
            .await?;

        let user = users
            .create(NewUser {
                name: account.name.to_string(),
                email,
                password_hash,
                role: account.role,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "Demo account created");
        report.created.push(user.email.into_inner());
    }

    Ok(report)
}
