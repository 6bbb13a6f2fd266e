//! Mail-delivery collaborator contract.
//!
//! # Responsibility
//! - Define the eight composed-message send entry points, one per event.
//! - Fix the uniform delivery outcome shape shared with the dispatcher.
//!
//! # Invariants
//! - Implementations should return a failed outcome rather than panic;
//!   the dispatcher still guards against panicking implementations.

use crate::notify::event::{
    ContactResponsePayload, ContentPublishedPayload, LeadAssignedPayload, NewContactPayload,
    NewLeadPayload, NewUserPendingPayload, UserApprovedPayload, UserRejectedPayload,
};
use serde::Serialize;

/// Uniform result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// External mail-delivery integration.
///
/// Multi-recipient sends take a slice; single-recipient sends take one
/// address. The dispatcher owns cardinality normalization, so
/// implementations never see the wrong shape.
pub trait Mailer: Send + Sync {
    fn send_new_user_pending(
        &self,
        to: &[String],
        payload: &NewUserPendingPayload,
    ) -> DeliveryOutcome;

    fn send_user_approved(&self, to: &str, payload: &UserApprovedPayload) -> DeliveryOutcome;

    fn send_user_rejected(&self, to: &str, payload: &UserRejectedPayload) -> DeliveryOutcome;

    fn send_new_contact(&self, to: &[String], payload: &NewContactPayload) -> DeliveryOutcome;

    fn send_contact_response(
        &self,
        to: &str,
        payload: &ContactResponsePayload,
    ) -> DeliveryOutcome;

    fn send_new_lead(&self, to: &[String], payload: &NewLeadPayload) -> DeliveryOutcome;

    fn send_lead_assigned(&self, to: &str, payload: &LeadAssignedPayload) -> DeliveryOutcome;

    fn send_content_published(
        &self,
        to: &str,
        payload: &ContentPublishedPayload,
    ) -> DeliveryOutcome;
}
