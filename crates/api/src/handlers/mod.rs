pub mod auth;
pub mod comments;
pub mod reports;
pub mod tickets;
