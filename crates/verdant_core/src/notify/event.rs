//! Notification event types and recipient specification.
//!
//! # Responsibility
//! - Define one payload type per notification event.
//! - Keep the event set closed so routing stays exhaustively matched;
//!   adding a variant is a compile-time obligation for the dispatcher.

use serde::{Deserialize, Serialize};

/// Recipient specification accepted on the wire: a single address or a
/// list of addresses. Cardinality normalization per event type happens in
/// the dispatcher, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(address) => address.is_empty(),
            Self::Many(addresses) => addresses.is_empty(),
        }
    }

    /// Coerces into a list; a single address becomes a one-element list.
    /// Single-recipient event types take the first element of this list
    /// and silently discard the remainder (documented coercion, applied
    /// by the dispatcher).
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::One(address) => vec![address],
            Self::Many(addresses) => addresses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserPendingPayload {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserApprovedPayload {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRejectedPayload {
    pub name: String,
    pub reason: String,
}

/// The submitted contact-form fields, forwarded verbatim to staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponsePayload {
    /// Staff-written reply body.
    pub response: String,
    /// The submitter's original message, quoted for context.
    pub original_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeadPayload {
    pub name: String,
    pub email: String,
    pub interest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadAssignedPayload {
    pub lead_name: String,
    pub assignee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPublishedPayload {
    pub title: String,
    pub url: String,
}

/// Closed sum of every notification the back office can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    NewUserPending(NewUserPendingPayload),
    UserApproved(UserApprovedPayload),
    UserRejected(UserRejectedPayload),
    NewContact(NewContactPayload),
    ContactResponse(ContactResponsePayload),
    NewLead(NewLeadPayload),
    LeadAssigned(LeadAssignedPayload),
    ContentPublished(ContentPublishedPayload),
}

impl NotificationEvent {
    /// Returns the wire token for this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NewUserPending(_) => "new_user_pending",
            Self::UserApproved(_) => "user_approved",
            Self::UserRejected(_) => "user_rejected",
            Self::NewContact(_) => "new_contact",
            Self::ContactResponse(_) => "contact_response",
            Self::NewLead(_) => "new_lead",
            Self::LeadAssigned(_) => "lead_assigned",
            Self::ContentPublished(_) => "content_published",
        }
    }
}
