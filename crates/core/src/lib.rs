//! Domain core for the helpdesk backend.
//!
//! Holds the role/capability model, the ticket lifecycle, comments, the port
//! traits that storage and delivery adapters implement, and the services that
//! orchestrate each user-facing operation. Nothing in this crate performs I/O
//! directly; every side effect goes through a port.

pub mod comment;
pub mod email;
pub mod error;
pub mod notify;
pub mod pagination;
pub mod password;
pub mod ports;
pub mod roles;
pub mod services;
pub mod ticket;
pub mod types;
pub mod user;
