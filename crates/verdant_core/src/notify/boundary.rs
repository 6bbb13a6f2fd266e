//! JSON request boundary for notification dispatch.
//!
//! # Responsibility
//! - Parse `{type, to, data}` request bodies into typed events.
//! - Map dispatch outcomes onto the fixed status-code contract
//!   (400 validation, 500 delivery failure, 200 success).
//!
//! # Invariants
//! - Validation fully completes before any delivery attempt.
//! - This boundary never lets a panic escape to the transport layer.

use crate::notify::dispatcher::{panic_summary, Dispatcher};
use crate::notify::event::{NotificationEvent, Recipients};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Request-shape failures detected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyRequestError {
    MalformedBody(String),
    MissingField(&'static str),
    EmptyRecipients,
    UnknownEventType(String),
    InvalidPayload {
        event_type: &'static str,
        message: String,
    },
}

impl Display for NotifyRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedBody(message) => write!(f, "malformed request body: {message}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::EmptyRecipients => write!(f, "recipient list is empty"),
            Self::UnknownEventType(value) => write!(f, "unknown event type: {value}"),
            Self::InvalidPayload {
                event_type,
                message,
            } => write!(f, "invalid payload for {event_type}: {message}"),
        }
    }
}

impl Error for NotifyRequestError {}

#[derive(Debug, Deserialize)]
struct RawNotifyRequest {
    #[serde(rename = "type")]
    event_type: Option<String>,
    to: Option<Recipients>,
    data: Option<Value>,
}

/// Parses a request body into recipients plus a typed event.
///
/// Field presence is checked first (`type`, `to`, `data`, in that order),
/// then recipient non-emptiness, then the event type, then the payload
/// shape. Nothing is dispatched from here.
pub fn parse_notify_request(
    body: &str,
) -> Result<(Recipients, NotificationEvent), NotifyRequestError> {
    let raw: RawNotifyRequest = serde_json::from_str(body)
        .map_err(|err| NotifyRequestError::MalformedBody(err.to_string()))?;

    let event_type = raw
        .event_type
        .ok_or(NotifyRequestError::MissingField("type"))?;
    let to = raw.to.ok_or(NotifyRequestError::MissingField("to"))?;
    let data = raw.data.ok_or(NotifyRequestError::MissingField("data"))?;

    if to.is_empty() {
        return Err(NotifyRequestError::EmptyRecipients);
    }

    let event = match event_type.as_str() {
        "new_user_pending" => NotificationEvent::NewUserPending(decode("new_user_pending", data)?),
        "user_approved" => NotificationEvent::UserApproved(decode("user_approved", data)?),
        "user_rejected" => NotificationEvent::UserRejected(decode("user_rejected", data)?),
        "new_contact" => NotificationEvent::NewContact(decode("new_contact", data)?),
        "contact_response" => NotificationEvent::ContactResponse(decode("contact_response", data)?),
        "new_lead" => NotificationEvent::NewLead(decode("new_lead", data)?),
        "lead_assigned" => NotificationEvent::LeadAssigned(decode("lead_assigned", data)?),
        "content_published" => {
            NotificationEvent::ContentPublished(decode("content_published", data)?)
        }
        _ => return Err(NotifyRequestError::UnknownEventType(event_type)),
    };

    Ok((to, event))
}

fn decode<T: serde::de::DeserializeOwned>(
    event_type: &'static str,
    data: Value,
) -> Result<T, NotifyRequestError> {
    serde_json::from_value(data).map_err(|err| NotifyRequestError::InvalidPayload {
        event_type,
        message: err.to_string(),
    })
}

/// Transport-agnostic response for the notify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyResponse {
    /// HTTP status the hosting transport should answer with. Not part of
    /// the serialized body; the body is only `{success, error?}`.
    #[serde(skip)]
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotifyResponse {
    fn ok() -> Self {
        Self {
            status: 200,
            success: true,
            error: None,
        }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self {
            status: 400,
            success: false,
            error: Some(error.into()),
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            status: 500,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Handles one notify request body end to end.
///
/// The hosting HTTP layer only frames the request and serializes the
/// returned response; every decision about status codes lives here.
pub fn handle_notify(dispatcher: &Dispatcher, body: &str) -> NotifyResponse {
    let handled = catch_unwind(AssertUnwindSafe(|| {
        let (to, event) = match parse_notify_request(body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("event=notify_request module=notify status=rejected error={err}");
                return NotifyResponse::rejected(err.to_string());
            }
        };

        let outcome = dispatcher.dispatch(to, &event);
        if outcome.success {
            NotifyResponse::ok()
        } else {
            NotifyResponse::failed(
                outcome
                    .error
                    .unwrap_or_else(|| "internal server error".to_string()),
            )
        }
    }));

    match handled {
        Ok(response) => response,
        Err(payload) => {
            let message = panic_summary(payload.as_ref());
            error!(
                "event=notify_request module=notify status=error error_code=handler_panicked error={message}"
            );
            NotifyResponse::failed(message)
        }
    }
}
