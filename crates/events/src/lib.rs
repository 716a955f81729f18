//! Notification delivery for the helpdesk.
//!
//! - [`NotificationWorker`] -- drains the core notification queue and hands
//!   each job to a [`Notifier`](helpdesk_core::ports::Notifier).
//! - [`delivery::email::SmtpNotifier`] -- sends HTML emails over SMTP.
//! - [`delivery::log::LogNotifier`] -- records notifications in the log when
//!   SMTP is not configured.
//! - [`templates`] -- subjects and bodies for each notification.

pub mod delivery;
pub mod templates;
pub mod worker;

pub use delivery::email::{EmailConfig, EmailError, SmtpNotifier};
pub use delivery::log::LogNotifier;
pub use worker::NotificationWorker;
