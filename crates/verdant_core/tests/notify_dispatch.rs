use std::sync::{Arc, Mutex};
use verdant_core::notify::event::{
    ContactResponsePayload, ContentPublishedPayload, LeadAssignedPayload, NewContactPayload,
    NewLeadPayload, NewUserPendingPayload, UserApprovedPayload, UserRejectedPayload,
};
use verdant_core::{DeliveryOutcome, Dispatcher, Mailer, NotificationEvent, Recipients};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedSend {
    event_type: &'static str,
    to: Vec<String>,
}

struct MockMailer {
    sends: Mutex<Vec<RecordedSend>>,
    outcome: DeliveryOutcome,
    panic_message: Option<&'static str>,
}

impl MockMailer {
    fn delivering() -> Arc<Self> {
        Arc::new(Self {
            sends: Mutex::new(Vec::new()),
            outcome: DeliveryOutcome::ok(),
            panic_message: None,
        })
    }

    fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            sends: Mutex::new(Vec::new()),
            outcome: DeliveryOutcome::failed(error),
            panic_message: None,
        })
    }

    fn panicking(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            sends: Mutex::new(Vec::new()),
            outcome: DeliveryOutcome::ok(),
            panic_message: Some(message),
        })
    }

    fn record(&self, event_type: &'static str, to: Vec<String>) -> DeliveryOutcome {
        if let Some(message) = self.panic_message {
            panic!("{message}");
        }
        self.sends
            .lock()
            .unwrap()
            .push(RecordedSend { event_type, to });
        self.outcome.clone()
    }

    fn sends(&self) -> Vec<RecordedSend> {
        self.sends.lock().unwrap().clone()
    }
}

impl Mailer for MockMailer {
    fn send_new_user_pending(
        &self,
        to: &[String],
        _payload: &NewUserPendingPayload,
    ) -> DeliveryOutcome {
        self.record("new_user_pending", to.to_vec())
    }

    fn send_user_approved(&self, to: &str, _payload: &UserApprovedPayload) -> DeliveryOutcome {
        self.record("user_approved", vec![to.to_string()])
    }

    fn send_user_rejected(&self, to: &str, _payload: &UserRejectedPayload) -> DeliveryOutcome {
        self.record("user_rejected", vec![to.to_string()])
    }

    fn send_new_contact(&self, to: &[String], _payload: &NewContactPayload) -> DeliveryOutcome {
        self.record("new_contact", to.to_vec())
    }

    fn send_contact_response(
        &self,
        to: &str,
        _payload: &ContactResponsePayload,
    ) -> DeliveryOutcome {
        self.record("contact_response", vec![to.to_string()])
    }

    fn send_new_lead(&self, to: &[String], _payload: &NewLeadPayload) -> DeliveryOutcome {
        self.record("new_lead", to.to_vec())
    }

    fn send_lead_assigned(&self, to: &str, _payload: &LeadAssignedPayload) -> DeliveryOutcome {
        self.record("lead_assigned", vec![to.to_string()])
    }

    fn send_content_published(
        &self,
        to: &str,
        _payload: &ContentPublishedPayload,
    ) -> DeliveryOutcome {
        self.record("content_published", vec![to.to_string()])
    }
}

fn approved_event() -> NotificationEvent {
    NotificationEvent::UserApproved(UserApprovedPayload {
        name: "Ada".to_string(),
    })
}

fn new_contact_event() -> NotificationEvent {
    NotificationEvent::NewContact(NewContactPayload {
        name: "Ada".to_string(),
        email: "ada@example.org".to_string(),
        phone: None,
        message: "Hello".to_string(),
    })
}

#[test]
fn multi_recipient_event_coerces_single_address_to_list() {
    let mailer = MockMailer::delivering();
    let dispatcher = Dispatcher::new(mailer.clone());

    let outcome = dispatcher.dispatch(
        Recipients::One("staff@verdant.eco".to_string()),
        &new_contact_event(),
    );

    assert!(outcome.success);
    assert_eq!(
        mailer.sends(),
        vec![RecordedSend {
            event_type: "new_contact",
            to: vec!["staff@verdant.eco".to_string()],
        }]
    );
}

#[test]
fn single_recipient_event_truncates_list_to_first_address() {
    let mailer = MockMailer::delivering();
    let dispatcher = Dispatcher::new(mailer.clone());

    let outcome = dispatcher.dispatch(
        Recipients::Many(vec![
            "a@x.com".to_string(),
            "b@x.com".to_string(),
            "c@x.com".to_string(),
        ]),
        &approved_event(),
    );

    assert!(outcome.success);
    assert_eq!(
        mailer.sends(),
        vec![RecordedSend {
            event_type: "user_approved",
            to: vec!["a@x.com".to_string()],
        }]
    );
}

#[test]
fn every_event_routes_to_exactly_one_send() {
    let events = [
        NotificationEvent::NewUserPending(NewUserPendingPayload {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
        }),
        approved_event(),
        NotificationEvent::UserRejected(UserRejectedPayload {
            name: "Ada".to_string(),
            reason: "incomplete application".to_string(),
        }),
        new_contact_event(),
        NotificationEvent::ContactResponse(ContactResponsePayload {
            response: "Thanks!".to_string(),
            original_message: "Hello".to_string(),
        }),
        NotificationEvent::NewLead(NewLeadPayload {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            interest: Some("solar".to_string()),
        }),
        NotificationEvent::LeadAssigned(LeadAssignedPayload {
            lead_name: "Ada".to_string(),
            assignee: "sam".to_string(),
        }),
        NotificationEvent::ContentPublished(ContentPublishedPayload {
            title: "Impact report".to_string(),
            url: "https://verdant.eco/impact".to_string(),
        }),
    ];

    for event in &events {
        let mailer = MockMailer::delivering();
        let dispatcher = Dispatcher::new(mailer.clone());

        let outcome = dispatcher.dispatch(Recipients::One("one@verdant.eco".to_string()), event);

        assert!(outcome.success, "dispatch failed for {}", event.event_type());
        let sends = mailer.sends();
        assert_eq!(sends.len(), 1, "expected one send for {}", event.event_type());
        assert_eq!(sends[0].event_type, event.event_type());
    }
}

#[test]
fn delivery_failure_is_returned_unchanged() {
    let mailer = MockMailer::failing("smtp relay unreachable");
    let dispatcher = Dispatcher::new(mailer.clone());

    let outcome = dispatcher.dispatch(
        Recipients::One("ada@example.org".to_string()),
        &approved_event(),
    );

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("smtp relay unreachable"));
    assert_eq!(mailer.sends().len(), 1);
}

#[test]
fn empty_recipient_list_fails_without_delivery_attempt() {
    let mailer = MockMailer::delivering();
    let dispatcher = Dispatcher::new(mailer.clone());

    let outcome = dispatcher.dispatch(Recipients::Many(Vec::new()), &approved_event());

    assert!(!outcome.success);
    assert!(outcome.error.is_some());
    assert!(mailer.sends().is_empty());
}

#[test]
fn panicking_mailer_becomes_failed_outcome() {
    let mailer = MockMailer::panicking("mailer exploded");
    let dispatcher = Dispatcher::new(mailer.clone());

    let outcome = dispatcher.dispatch(
        Recipients::One("ada@example.org".to_string()),
        &approved_event(),
    );

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("mailer exploded"));
}
