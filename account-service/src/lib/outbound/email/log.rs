use async_trait::async_trait;

use crate::account::errors::EmailDeliveryError;
use crate::domain::account::emails::EmailMessage;
use crate::domain::account::ports::EmailSender;

/// Writes rendered messages to the log. For development without an SMTP relay.
pub struct LogEmailSender {
    base_url: String,
}

impl LogEmailSender {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailDeliveryError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.render_body(&self.base_url),
            "Email not delivered, SMTP is not configured"
        );
        Ok(())
    }
}
