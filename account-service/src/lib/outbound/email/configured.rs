use async_trait::async_trait;

use super::LogEmailSender;
use super::SmtpEmailSender;
use crate::account::errors::EmailDeliveryError;
use crate::config::EmailConfig;
use crate::domain::account::emails::EmailMessage;
use crate::domain::account::ports::EmailSender;

/// Sender chosen from configuration: SMTP when a relay host is set, the log otherwise.
pub enum ConfiguredEmailSender {
    Smtp(SmtpEmailSender),
    Log(LogEmailSender),
}

impl ConfiguredEmailSender {
    /// # Errors
    /// Same as [`SmtpEmailSender::new`] when `smtp_host` is set
    pub fn from_config(config: &EmailConfig) -> Result<Self, EmailDeliveryError> {
        match &config.smtp_host {
            Some(host) => {
                tracing::info!(
                    smtp_host = %host,
                    smtp_port = config.smtp_port,
                    "Using SMTP email delivery"
                );
                Ok(Self::Smtp(SmtpEmailSender::new(config)?))
            }
            None => {
                tracing::warn!("smtp_host is not set, emails will only be logged");
                Ok(Self::Log(LogEmailSender::new(config.base_url.clone())))
            }
        }
    }
}

#[async_trait]
impl EmailSender for ConfiguredEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailDeliveryError> {
        match self {
            Self::Smtp(sender) => sender.send(message).await,
            Self::Log(sender) => sender.send(message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(smtp_host: Option<&str>) -> EmailConfig {
        EmailConfig {
            smtp_host: smtp_host.map(str::to_string),
            smtp_port: 587,
            from_address: "noreply@example.com".to_string(),
            smtp_user: None,
            smtp_password: None,
            base_url: "http://127.0.0.1:3000".to_string(),
        }
    }

    #[test]
    fn test_smtp_when_host_configured() {
        let sender = ConfiguredEmailSender::from_config(&config(Some("smtp.example.com"))).unwrap();
        assert!(matches!(sender, ConfiguredEmailSender::Smtp(_)));
    }

    #[test]
    fn test_log_without_host() {
        let sender = ConfiguredEmailSender::from_config(&config(None)).unwrap();
        assert!(matches!(sender, ConfiguredEmailSender::Log(_)));
    }

    #[test]
    fn test_invalid_smtp_settings_surface() {
        let mut smtp = config(Some("smtp.example.com"));
        smtp.from_address = "not an address".to_string();

        let result = ConfiguredEmailSender::from_config(&smtp);
        assert!(matches!(result, Err(EmailDeliveryError::Address(_))));
    }
}
