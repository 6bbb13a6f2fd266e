//! Contact inbox use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for staff tooling and the contact form.
//! - Delegate persistence to the repository contract.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Creating a submission performs no implicit notification dispatch;
//!   orchestration of staff emails belongs to the caller.

use crate::model::contact::{ContactId, ContactStatus, ContactSubmission, NewContact};
use crate::repo::contact_repo::{ContactCounts, ContactRepository, RepoResult};
use log::info;

/// Use-case wrapper over the contact repository.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new contact-form submission and returns its id.
    ///
    /// # Contract
    /// - `status` starts as `new`; `created_at` comes from the store clock.
    /// - Exactly one insert; no other side effects.
    pub fn submit(&self, request: &NewContact) -> RepoResult<ContactId> {
        let id = self.repo.create(request)?;
        info!("event=contact_create module=service status=ok contact_id={id}");
        Ok(id)
    }

    /// Moves a submission to `status`.
    ///
    /// Any status may follow any other; there is no transition table.
    pub fn mark_status(&self, id: ContactId, status: ContactStatus) -> RepoResult<()> {
        self.repo.update_status(id, status)?;
        info!("event=contact_status module=service status=ok contact_id={id} to={status}");
        Ok(())
    }

    /// Sets the staff note on a submission, replacing any previous note.
    pub fn set_note(&self, id: ContactId, notes: &str) -> RepoResult<()> {
        self.repo.set_note(id, notes)?;
        info!("event=contact_note module=service status=ok contact_id={id}");
        Ok(())
    }

    /// Permanently deletes a submission.
    pub fn remove(&self, id: ContactId) -> RepoResult<()> {
        self.repo.delete(id)?;
        info!("event=contact_delete module=service status=ok contact_id={id}");
        Ok(())
    }

    /// Fetches one submission by id.
    pub fn get(&self, id: ContactId) -> RepoResult<Option<ContactSubmission>> {
        self.repo.get(id)
    }

    /// Lists submissions, optionally filtered by status, most recent first.
    pub fn list(&self, status: Option<ContactStatus>) -> RepoResult<Vec<ContactSubmission>> {
        self.repo.list(status)
    }

    /// Lists submissions in exactly one status, most recent first.
    pub fn get_by_status(&self, status: ContactStatus) -> RepoResult<Vec<ContactSubmission>> {
        self.repo.get_by_status(status)
    }

    /// Returns dashboard counts over the whole inbox.
    pub fn counts(&self) -> RepoResult<ContactCounts> {
        self.repo.counts()
    }
}
