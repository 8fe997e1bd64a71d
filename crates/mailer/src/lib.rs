//! Summary email delivery
//!
//! The conversation flow only needs a boolean success signal: a failed
//! delivery becomes a retry prompt, never an error surfaced to the
//! client. Implementations log their own failures.

pub mod html;
pub mod smtp;

pub use html::render_html;
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use parking_lot::Mutex;

use parkdesk_core::EmailConfig;

/// Mail delivery collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `body` according to `config`; true on success
    async fn send(&self, config: &EmailConfig, body: &str) -> bool;
}

/// Mailer that records sends without delivering anything
///
/// Used in tests and when running without an SMTP relay.
pub struct NoopMailer {
    outcome: bool,
    sent: Mutex<Vec<(EmailConfig, String)>>,
}

impl NoopMailer {
    /// Create a stub that reports `outcome` for every send
    pub fn new(outcome: bool) -> Self {
        Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Number of sends attempted so far
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// The most recent send, if any
    pub fn last_sent(&self) -> Option<(EmailConfig, String)> {
        self.sent.lock().last().cloned()
    }
}

impl Default for NoopMailer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, config: &EmailConfig, body: &str) -> bool {
        tracing::debug!(to = %config.to, outcome = self.outcome, "NoopMailer send");
        self.sent.lock().push((config.clone(), body.to_string()));
        self.outcome
    }
}
