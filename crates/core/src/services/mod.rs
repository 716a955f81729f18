//! Use-case services.
//!
//! Each service receives its ports at construction and exposes one method
//! per user-facing operation. Every method takes the already-authenticated
//! acting [`User`](crate::user::User) where authorization applies.
//!
//! - [`auth::AuthService`] -- login and access-token refresh.
//! - [`tickets::TicketService`] -- ticket CRUD and status changes.
//! - [`comments::CommentService`] -- staff comments on tickets.
//! - [`reports::ReportService`] -- dashboard statistics.

pub mod auth;
pub mod comments;
pub mod reports;
pub mod tickets;

pub use auth::AuthService;
pub use comments::CommentService;
pub use reports::ReportService;
pub use tickets::TicketService;
