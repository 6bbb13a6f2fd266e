//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the contact-store data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `NewContact::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod contact_repo;
