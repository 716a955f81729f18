//! `helpdesk-seed`: apply migrations and create the demo accounts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helpdesk_api::auth::password::Argon2Credentials;
use helpdesk_api::seed::seed_demo_accounts;
use helpdesk_db::PgUserStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_api=info,helpdesk_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = helpdesk_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    helpdesk_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let password_override = std::env::var("SEED_PASSWORD_OVERRIDE").ok();
    let users = PgUserStore::new(pool);

    match seed_demo_accounts(&users, &Argon2Credentials, password_override.as_deref()).await {
        Ok(report) => {
            tracing::info!(
                created = report.created.len(),
                skipped = report.skipped.len(),
                "Seed complete",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Seed failed");
            std::process::exit(1);
        }
    }
}
