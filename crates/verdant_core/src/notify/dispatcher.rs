//! Typed routing from notification events to delivery calls.
//!
//! # Responsibility
//! - Select the delivery call for each event via exhaustive matching.
//! - Normalize recipient cardinality per the fixed routing contract.
//!
//! # Invariants
//! - At most one delivery call per dispatch; zero when validation fails.
//! - The mailer's outcome is returned unchanged; no retries here.
//! - A panicking mailer is converted to a failed outcome, never rethrown.

use crate::notify::event::{NotificationEvent, Recipients};
use crate::notify::mailer::{DeliveryOutcome, Mailer};
use log::{error, info, warn};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Stateless router over the mail-delivery collaborator.
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Routes one event to its delivery call.
    ///
    /// # Cardinality contract
    /// - `new_user_pending`, `new_contact`, `new_lead`: delivered to a
    ///   list; a single address is coerced into a one-element list.
    /// - All other events: delivered to one address; when a list is
    ///   supplied, the first element wins and the rest is silently
    ///   discarded (documented coercion, not an error).
    pub fn dispatch(&self, recipients: Recipients, event: &NotificationEvent) -> DeliveryOutcome {
        let event_type = event.event_type();

        // Extract both call shapes up front; a usable first address is the
        // precondition for every route, so validation cannot be skipped.
        let all = recipients.into_list();
        let first = match all.first() {
            Some(address) if !address.is_empty() => address.clone(),
            _ => {
                warn!(
                    "event=notify_dispatch module=notify status=rejected event_type={event_type} reason=empty_recipients"
                );
                return DeliveryOutcome::failed("recipient list is empty");
            }
        };

        let mailer = Arc::clone(&self.mailer);
        let outcome = guard_delivery(event_type, move || match event {
            NotificationEvent::NewUserPending(payload) => {
                mailer.send_new_user_pending(&all, payload)
            }
            NotificationEvent::UserApproved(payload) => {
                mailer.send_user_approved(&first, payload)
            }
            NotificationEvent::UserRejected(payload) => {
                mailer.send_user_rejected(&first, payload)
            }
            NotificationEvent::NewContact(payload) => mailer.send_new_contact(&all, payload),
            NotificationEvent::ContactResponse(payload) => {
                mailer.send_contact_response(&first, payload)
            }
            NotificationEvent::NewLead(payload) => mailer.send_new_lead(&all, payload),
            NotificationEvent::LeadAssigned(payload) => {
                mailer.send_lead_assigned(&first, payload)
            }
            NotificationEvent::ContentPublished(payload) => {
                mailer.send_content_published(&first, payload)
            }
        });

        match &outcome {
            DeliveryOutcome { success: true, .. } => {
                info!("event=notify_dispatch module=notify status=ok event_type={event_type}");
            }
            DeliveryOutcome { error, .. } => {
                warn!(
                    "event=notify_dispatch module=notify status=delivery_failed event_type={event_type} error={}",
                    error.as_deref().unwrap_or("unspecified")
                );
            }
        }

        outcome
    }
}

fn guard_delivery<F>(event_type: &str, call: F) -> DeliveryOutcome
where
    F: FnOnce() -> DeliveryOutcome,
{
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_summary(payload.as_ref());
            error!(
                "event=notify_dispatch module=notify status=error event_type={event_type} error_code=mailer_panicked error={message}"
            );
            DeliveryOutcome::failed(message)
        }
    }
}

pub(crate) fn panic_summary(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "internal server error".to_string()
    }
}
