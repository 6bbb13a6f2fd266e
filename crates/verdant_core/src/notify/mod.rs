//! Transactional notification routing.
//!
//! # Responsibility
//! - Define the closed set of notification events and their payloads.
//! - Route each event to the matching mail-delivery call with normalized
//!   recipient cardinality.
//!
//! # Invariants
//! - Exactly one outbound delivery call per dispatch.
//! - A delivery fault never crosses the dispatcher as a panic; it is
//!   converted to a failed outcome.

pub mod boundary;
pub mod dispatcher;
pub mod event;
pub mod mailer;
