//! Back-office core for the Verdant marketing site.
//! This crate is the single source of truth for the contact-inbox
//! lifecycle and transactional notification routing.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    ContactId, ContactStatus, ContactSubmission, ContactValidationError, NewContact,
};
pub use notify::boundary::{handle_notify, parse_notify_request, NotifyRequestError, NotifyResponse};
pub use notify::dispatcher::Dispatcher;
pub use notify::event::{NotificationEvent, Recipients};
pub use notify::mailer::{DeliveryOutcome, Mailer};
pub use repo::contact_repo::{
    ContactCounts, ContactRepository, RepoError, RepoResult, SqliteContactRepository,
};
pub use service::contact_service::ContactService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
