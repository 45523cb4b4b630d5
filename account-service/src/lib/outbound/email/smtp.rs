//! Account email delivery via SMTP.
//!
//! [`SmtpEmailSender`] wraps the `lettre` async SMTP transport and sends
//! plain-text bodies rendered from [`EmailMessage`] templates.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::account::errors::EmailDeliveryError;
use crate::config::EmailConfig;
use crate::domain::account::emails::EmailMessage;
use crate::domain::account::ports::EmailSender;

pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    base_url: String,
}

impl SmtpEmailSender {
    /// Build a STARTTLS relay sender.
    ///
    /// # Errors
    /// * `Address` - `smtp_host` is missing or `from_address` is unparsable
    /// * `Transport` - Relay could not be configured
    pub fn new(config: &EmailConfig) -> Result<Self, EmailDeliveryError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| EmailDeliveryError::Address("smtp_host is not configured".into()))?;

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| EmailDeliveryError::Address(e.to_string()))?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| EmailDeliveryError::Transport(e.to_string()))?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: transport_builder.build(),
            from,
            base_url: config.base_url.clone(),
        })
    }

    fn build(&self, message: &EmailMessage) -> Result<Message, EmailDeliveryError> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| EmailDeliveryError::Address(e.to_string()))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.render_body(&self.base_url))
            .map_err(|e| EmailDeliveryError::Build(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailDeliveryError> {
        let email = self.build(message)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| EmailDeliveryError::Transport(e.to_string()))?;

        tracing::info!(
            to = %message.to,
            template = message.template.name(),
            "Account email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::models::EmailAddress;

    fn config(smtp_host: Option<&str>, from_address: &str) -> EmailConfig {
        EmailConfig {
            smtp_host: smtp_host.map(str::to_string),
            smtp_port: 587,
            from_address: from_address.to_string(),
            smtp_user: None,
            smtp_password: None,
            base_url: "http://127.0.0.1:3000".to_string(),
        }
    }

    #[test]
    fn test_requires_smtp_host() {
        let result = SmtpEmailSender::new(&config(None, "noreply@example.com"));
        assert!(matches!(result, Err(EmailDeliveryError::Address(_))));
    }

    #[test]
    fn test_rejects_invalid_from_address() {
        let result = SmtpEmailSender::new(&config(Some("smtp.example.com"), "not an address"));
        assert!(matches!(result, Err(EmailDeliveryError::Address(_))));
    }

    #[tokio::test]
    async fn test_build_renders_link() {
        let sender = SmtpEmailSender::new(&config(Some("smtp.example.com"), "noreply@example.com"))
            .unwrap();
        let to = EmailAddress::new("a@x.com".to_string()).unwrap();
        let message = EmailMessage::verification(&to, "abc");

        let email = sender.build(&message).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("Subject: Verify Email"));
        assert!(raw.contains("http://127.0.0.1:3000/auth/verify-email?token=abc"));
    }
}
