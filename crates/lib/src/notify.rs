//! Outbound notification boundary.
//!
//! Signup confirmations and password-reset messages leave the store through
//! the [`Notifier`] trait. Delivery is fire-and-forget: the store hands the
//! message off and moves on, it never waits for, retries, or fails a
//! mutation over a notification.

use std::fmt::Debug;
use tracing::info;

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// The kind of message handed to a notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Welcome message after a successful signup.
    SignupConfirmation,
    /// Reset instructions after a password-reset request.
    PasswordReset,
}

/// Outbound delivery hook for identity messages.
///
/// Implementations own their failure handling; from the store's point of
/// view `send` cannot fail. Implementations should also return promptly,
/// since they run inside synchronous store operations.
pub trait Notifier: Send + Sync + Debug {
    /// Hands a message to the delivery channel.
    fn send(&self, email: &str, kind: MessageKind);
}

/// Default notifier that writes messages to the log.
///
/// Stands in for a real mail channel the same way the store itself stands in
/// for a real credential system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, email: &str, kind: MessageKind) {
        match kind {
            MessageKind::SignupConfirmation => {
                info!(%email, "Sending confirmation email")
            }
            MessageKind::PasswordReset => {
                info!(%email, "Sending password reset email")
            }
        }
    }
}

/// Test notifier that records every message for assertions.
///
/// Only available with the `testing` feature or in test builds.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, MessageKind)>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingNotifier {
    /// Creates a notifier with an empty message log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message sent so far, in order.
    pub fn sent(&self) -> Vec<(String, MessageKind)> {
        self.sent.lock().unwrap().clone()
    }

    /// Counts messages of one kind delivered to an address.
    pub fn count_for(&self, email: &str, kind: MessageKind) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, k)| e == email && *k == kind)
            .count()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Notifier for RecordingNotifier {
    fn send(&self, email: &str, kind: MessageKind) {
        self.sent.lock().unwrap().push((email.to_string(), kind));
    }
}
