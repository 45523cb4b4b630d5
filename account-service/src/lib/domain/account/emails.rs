use std::collections::BTreeMap;

use crate::domain::account::models::EmailAddress;

/// Body templates for account emails.
///
/// Placeholders use `{name}`; `base_url` is filled in by the sending adapter,
/// everything else comes from the message params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    VerifyEmail,
    ResetPassword,
}

impl EmailTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            EmailTemplate::VerifyEmail => "verify_email",
            EmailTemplate::ResetPassword => "reset_password",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            EmailTemplate::VerifyEmail => {
                "Hello {email},\n\n\
                 Confirm your email address by opening the link below:\n\
                 {base_url}/auth/verify-email?token={token}\n\n\
                 The link expires in a few minutes."
            }
            EmailTemplate::ResetPassword => {
                "Hello {email},\n\n\
                 A password reset was requested for your account. Open the link below to choose a new password:\n\
                 {base_url}/auth/reset-password?token={token}\n\n\
                 If you did not request this, ignore this email."
            }
        }
    }
}

/// Outbound account email, independent of the delivery mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub template: EmailTemplate,
    pub params: BTreeMap<String, String>,
}

impl EmailMessage {
    /// Verification link email carrying a one-time token.
    pub fn verification(to: &EmailAddress, token: &str) -> Self {
        Self::with_token(to, "Verify Email", EmailTemplate::VerifyEmail, token)
    }

    /// Password reset email carrying a one-time token.
    pub fn password_reset(to: &EmailAddress, token: &str) -> Self {
        Self::with_token(to, "Reset Password", EmailTemplate::ResetPassword, token)
    }

    fn with_token(to: &EmailAddress, subject: &str, template: EmailTemplate, token: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert("email".to_string(), to.as_str().to_string());
        params.insert("token".to_string(), token.to_string());

        Self {
            to: to.as_str().to_string(),
            subject: subject.to_string(),
            template,
            params,
        }
    }

    /// One-time token embedded in the message, if any.
    pub fn token(&self) -> Option<&str> {
        self.params.get("token").map(String::as_str)
    }

    /// Render the body with the message params plus `base_url`.
    pub fn render_body(&self, base_url: &str) -> String {
        let mut params = self.params.clone();
        params.insert(
            "base_url".to_string(),
            base_url.trim_end_matches('/').to_string(),
        );
        render(self.template.body(), &params)
    }
}

/// Substitute `{name}` placeholders in one pass over `body`.
///
/// Unknown placeholders are left untouched and substituted values are never
/// scanned again.
pub fn render(body: &str, params: &BTreeMap<String, String>) -> String {
    let mut rendered = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let value = tail
            .find(|c: char| c == '{' || c == '}')
            .filter(|&close| tail[close..].starts_with('}'))
            .and_then(|close| params.get(&tail[..close]).map(|value| (close, value)));

        match value {
            Some((close, value)) => {
                rendered.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = tail;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
