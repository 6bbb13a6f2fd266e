//! Contact submission domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted for every contact-form entry.
//! - Validate required-field presence before any write path runs.
//!
//! # Invariants
//! - `id` is stable and never reused for another submission.
//! - `status` only ever holds one of the four enumerated values.
//! - `created_at` is assigned once by the store clock and never mutated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a contact submission.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = Uuid;

/// Staff-facing lifecycle state of a submission.
///
/// No transition table is enforced: any status may follow any other, and
/// archived submissions can be reopened by setting `New` or `Read` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    /// Submitted, not yet looked at.
    New,
    /// Seen by staff, no reply sent yet.
    Read,
    /// A reply went out to the submitter.
    Responded,
    /// Kept for the record, out of the active inbox.
    Archived,
}

impl ContactStatus {
    /// Returns the storage/wire token for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Responded => "responded",
            Self::Archived => "archived",
        }
    }

    /// Parses a storage/wire token back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "read" => Some(Self::Read),
            "responded" => Some(Self::Responded),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical persisted record for one contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Stable global ID used for staff actions and auditing.
    pub id: ContactId,
    pub name: String,
    /// Format validation is the submitting caller's responsibility; the
    /// store only requires presence.
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    /// Staff-authored note. Absent until first set; overwritten on each set.
    pub notes: Option<String>,
    /// Unix epoch milliseconds, stamped by the store clock at creation.
    pub created_at: i64,
}

/// Creation request for a new submission.
///
/// Carries exactly the caller-supplied fields; `id`, `status` and
/// `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl NewContact {
    /// Checks required-field presence.
    ///
    /// This is the schema-level contract only; no email-format or other
    /// business-rule validation happens here.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::MissingName);
        }
        if self.email.trim().is_empty() {
            return Err(ContactValidationError::MissingEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ContactValidationError::MissingMessage);
        }
        Ok(())
    }
}

/// Required-field presence failures for submission creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    MissingName,
    MissingEmail,
    MissingMessage,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "contact name must not be empty"),
            Self::MissingEmail => write!(f, "contact email must not be empty"),
            Self::MissingMessage => write!(f, "contact message must not be empty"),
        }
    }
}

impl Error for ContactValidationError {}

#[cfg(test)]
mod tests {
    use super::{ContactStatus, ContactValidationError, NewContact};

    fn request() -> NewContact {
        NewContact {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            phone: None,
            message: "Interested in your reforestation program.".to_string(),
        }
    }

    #[test]
    fn status_tokens_roundtrip() {
        for status in [
            ContactStatus::New,
            ContactStatus::Read,
            ContactStatus::Responded,
            ContactStatus::Archived,
        ] {
            assert_eq!(ContactStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ContactStatus::parse("deleted"), None);
    }

    #[test]
    fn validate_accepts_complete_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let mut blank_name = request();
        blank_name.name = "   ".to_string();
        assert_eq!(
            blank_name.validate(),
            Err(ContactValidationError::MissingName)
        );

        let mut blank_email = request();
        blank_email.email = String::new();
        assert_eq!(
            blank_email.validate(),
            Err(ContactValidationError::MissingEmail)
        );

        let mut blank_message = request();
        blank_message.message = "\n".to_string();
        assert_eq!(
            blank_message.validate(),
            Err(ContactValidationError::MissingMessage)
        );
    }
}
