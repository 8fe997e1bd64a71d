//! SMTP delivery over lettre's async transport

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use parkdesk_config::SmtpConfig;
use parkdesk_core::EmailConfig;

use crate::html::render_html;
use crate::Mailer;

/// Mailer backed by an SMTP relay
///
/// When the relay configuration is incomplete (no host, user or pass),
/// every send reports failure immediately without opening a connection.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Option<AsyncSmtpTransport<Tokio1Executor>> {
        let (Some(host), Some(user), Some(pass)) = (
            self.config.host.as_deref(),
            self.config.user.clone(),
            self.config.pass.clone(),
        ) else {
            tracing::error!("SMTP configuration incomplete, not attempting delivery");
            return None;
        };

        let builder = if self.config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        };

        match builder {
            Ok(builder) => Some(
                builder
                    .port(self.config.port)
                    .credentials(Credentials::new(user, pass))
                    .build(),
            ),
            Err(e) => {
                tracing::error!(error = %e, host, "Invalid SMTP relay configuration");
                None
            }
        }
    }
}

fn build_message(config: &EmailConfig, body: &str) -> Result<Message, String> {
    let from = config
        .from
        .parse::<Mailbox>()
        .map_err(|e| format!("invalid from address {:?}: {}", config.from, e))?;
    let to = config
        .to
        .parse::<Mailbox>()
        .map_err(|e| format!("invalid to address {:?}: {}", config.to, e))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(config.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            body.to_string(),
            render_html(body),
        ))
        .map_err(|e| format!("failed to build message: {}", e))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, config: &EmailConfig, body: &str) -> bool {
        let Some(transport) = self.transport() else {
            return false;
        };

        let message = match build_message(config, body) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Summary email not sent");
                return false;
            }
        };

        match transport.send(message).await {
            Ok(response) => {
                tracing::info!(to = %config.to, code = %response.code(), "Summary email sent");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, to = %config.to, "Failed to send summary email");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_config() -> EmailConfig {
        EmailConfig {
            to: "user@example.com".to_string(),
            from: "no-reply@urbanparking.co.il".to_string(),
            subject: "סיכום דיווח תקלה - חניה אורבנית".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_config_fails_without_connecting() {
        let mailer = SmtpMailer::new(SmtpConfig::default());
        assert!(!mailer.send(&email_config(), "body").await);
    }

    #[tokio::test]
    async fn test_partial_config_fails_without_connecting() {
        let mailer = SmtpMailer::new(SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            user: Some("desk".to_string()),
            ..Default::default()
        });
        assert!(!mailer.send(&email_config(), "body").await);
    }

    #[tokio::test]
    async fn test_unparseable_recipient_fails_before_delivery() {
        let mailer = SmtpMailer::new(SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            user: Some("desk".to_string()),
            pass: Some("secret".to_string()),
            ..Default::default()
        });
        let config = EmailConfig {
            to: "definitely not an address".to_string(),
            ..email_config()
        };
        // the transport connects lazily, so this fails on message
        // construction without any network traffic
        assert!(!mailer.send(&config, "body").await);
    }

    #[test]
    fn test_build_message() {
        let message = build_message(&email_config(), "שורה ראשונה\nשורה שניה");
        assert!(message.is_ok());
    }
}
