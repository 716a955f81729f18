use std::sync::Arc;

use helpdesk_core::notify::NotificationQueue;
use helpdesk_core::ports::{CommentStore, TicketStore, TokenService, UserStore};
use helpdesk_core::services::{AuthService, CommentService, ReportService, TicketService};
use helpdesk_db::{PgCommentStore, PgTicketStore, PgUserStore};

use crate::auth::jwt::JwtTokenService;
use crate::auth::password::Argon2Credentials;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: helpdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Used by the auth extractor to reload the calling user.
    pub users: Arc<dyn UserStore>,
    /// Used by the auth extractor to verify access tokens.
    pub tokens: Arc<dyn TokenService>,
    pub auth: Arc<AuthService>,
    pub tickets: Arc<TicketService>,
    pub comments: Arc<CommentService>,
    pub reports: Arc<ReportService>,
}

impl AppState {
    /// Wire the PostgreSQL stores, JWT token service, and Argon2 comparator
    /// into the use-case services. Notifications are pushed onto `notifications`.
    pub fn new(
        pool: helpdesk_db::DbPool,
        config: ServerConfig,
        notifications: NotificationQueue,
    ) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
        let tickets: Arc<dyn TicketStore> = Arc::new(PgTicketStore::new(pool.clone()));
        let comments: Arc<dyn CommentStore> = Arc::new(PgCommentStore::new(pool.clone()));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        let auth = AuthService::new(
            Arc::clone(&users),
            Arc::new(Argon2Credentials),
            Arc::clone(&tokens),
        );
        let ticket_service = TicketService::new(
            Arc::clone(&tickets),
            Arc::clone(&users),
            Arc::clone(&comments),
            notifications.clone(),
        );
        let comment_service =
            CommentService::new(Arc::clone(&tickets), Arc::clone(&comments), notifications);
        let reports = ReportService::new(tickets, Arc::clone(&users));

        Self {
            pool,
            config: Arc::new(config),
            users,
            tokens,
            auth: Arc::new(auth),
            tickets: Arc::new(ticket_service),
            comments: Arc::new(comment_service),
            reports: Arc::new(reports),
        }
    }
}
