//! Contact form relay.
//!
//! Submissions are delivered on a background thread so the UI keeps
//! running while the request is pending. Exactly one delivery attempt is
//! made per submit; the outcome is picked up by [`ContactRelay::poll`].

pub mod form;
pub mod relay;

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

pub use form::{ContactField, ContactForm, ContactSubmission};
pub use relay::{EmailJsRelay, MessageRelay};

/// Acknowledgment shown after a delivered message.
pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

/// Notification shown after a failed delivery.
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

/// Ways a delivery attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The service refused the message.
    #[error("Relay rejected the message ({status}): {body}")]
    Rejected {
        /// HTTP status returned by the service
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The worker thread went away without reporting a result.
    #[error("Delivery stopped unexpectedly")]
    Interrupted,
}

/// Reasons a submit is refused before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// The form failed validation.
    #[error("{0}")]
    Invalid(String),

    /// A previous submission has not finished yet.
    #[error("A message is already being sent")]
    Pending,
}

/// Relays contact form submissions.
pub struct ContactRelay {
    relay: Arc<dyn MessageRelay>,
    receiver: Option<Receiver<Result<(), RelayError>>>,
}

impl ContactRelay {
    /// Creates an idle relay.
    pub fn new(relay: Arc<dyn MessageRelay>) -> Self {
        Self {
            relay,
            receiver: None,
        }
    }

    /// Checks if a submission is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Validates the form and starts one delivery attempt in the background.
    pub fn submit(&mut self, form: &ContactForm) -> Result<(), ContactError> {
        if self.is_pending() {
            return Err(ContactError::Pending);
        }
        form.validate().map_err(ContactError::Invalid)?;

        let submission = form.submission();
        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        info!(subject = %submission.subject, "Sending contact message");

        let relay = Arc::clone(&self.relay);
        thread::spawn(move || {
            let _ = sender.send(relay.send(&submission));
        });

        Ok(())
    }

    /// Picks up the outcome of the pending submission, if it has arrived.
    ///
    /// On success the form is cleared; on failure it is left untouched so the
    /// user can retry.
    pub fn poll(&mut self, form: &mut ContactForm) -> Option<Result<(), RelayError>> {
        let outcome = match self.receiver.as_ref()?.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(RelayError::Interrupted),
        };
        self.receiver = None;

        match &outcome {
            Ok(()) => {
                info!("Contact message delivered");
                form.reset();
            }
            Err(e) => warn!(error = %e, "Contact message failed"),
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct FakeRelay {
        reject: bool,
        sent: Mutex<Vec<ContactSubmission>>,
    }

    impl FakeRelay {
        fn new(reject: bool) -> Arc<Self> {
            Arc::new(Self {
                reject,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    impl MessageRelay for FakeRelay {
        fn send(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
            self.sent.lock().unwrap().push(submission.clone());
            if self.reject {
                Err(RelayError::Rejected {
                    status: 400,
                    body: "The template ID is invalid".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            active_field: ContactField::Message,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Let's talk".to_string(),
        }
    }

    fn wait(relay: &mut ContactRelay, form: &mut ContactForm) -> Option<Result<(), RelayError>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(outcome) = relay.poll(form) {
                return Some(outcome);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_success_clears_form() {
        let fake = FakeRelay::new(false);
        let mut relay = ContactRelay::new(fake.clone());
        let mut form = filled();

        relay.submit(&form).unwrap();
        assert!(relay.is_pending());

        let outcome = wait(&mut relay, &mut form).unwrap();
        assert!(outcome.is_ok());
        assert!(!relay.is_pending());
        assert_eq!(form, ContactForm::new());
        assert_eq!(fake.sent.lock().unwrap().as_slice(), &[filled().submission()]);
    }

    #[test]
    fn test_failure_keeps_form() {
        let fake = FakeRelay::new(true);
        let mut relay = ContactRelay::new(fake.clone());
        let mut form = filled();

        relay.submit(&form).unwrap();
        let outcome = wait(&mut relay, &mut form).unwrap();
        assert!(matches!(outcome, Err(RelayError::Rejected { status: 400, .. })));
        assert_eq!(form, filled());
        assert_eq!(fake.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let fake = FakeRelay::new(false);
        let mut relay = ContactRelay::new(fake.clone());
        let mut form = filled();
        form.email = "not-an-email".to_string();

        assert!(matches!(relay.submit(&form), Err(ContactError::Invalid(_))));
        assert!(!relay.is_pending());
        assert!(fake.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_second_submit_while_pending_is_refused() {
        let fake = FakeRelay::new(false);
        let mut relay = ContactRelay::new(fake.clone());
        let mut form = filled();

        relay.submit(&form).unwrap();
        assert_eq!(relay.submit(&form), Err(ContactError::Pending));

        wait(&mut relay, &mut form).unwrap().unwrap();
        assert_eq!(fake.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_poll_without_submission() {
        let mut relay = ContactRelay::new(FakeRelay::new(false));
        let mut form = filled();
        assert!(relay.poll(&mut form).is_none());
        assert_eq!(form, filled());
    }
}
