//! Domain model for back-office contact handling.
//!
//! # Responsibility
//! - Define the canonical contact-submission record and its status enum.
//! - Keep creation-time validation rules next to the data they guard.
//!
//! # Invariants
//! - Every submission is identified by a stable `ContactId`.
//! - Deletion is a hard delete; no tombstone state exists in the model.

pub mod contact;
