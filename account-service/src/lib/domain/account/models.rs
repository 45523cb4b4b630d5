use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::RoleError;

/// User aggregate entity.
///
/// Created inactive at registration and activated by email verification.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh, inactive customer account.
    pub fn new_inactive(email: EmailAddress, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            is_active: false,
            role: Role::default(),
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format with an RFC 5322 parser. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 50;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - More than 50 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role. Carried in views, not enforced here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mentor,
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Mentor => "mentor",
            Role::Customer => "customer",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "mentor" => Ok(Role::Mentor),
            "customer" => Ok(Role::Customer),
            other => Err(RoleError(other.to_string())),
        }
    }
}

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 32;

/// Check a new password against the registration policy.
///
/// 8 to 32 characters, at least one uppercase letter and one digit.
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: PASSWORD_MIN_LENGTH,
            actual: length,
        });
    }
    if length > PASSWORD_MAX_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: PASSWORD_MAX_LENGTH,
            actual: length,
        });
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    Ok(())
}

/// Command to register an account with validated fields
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// * `ValidationFailed` - Email malformed or password violates the policy
    pub fn new(email: String, password: String) -> Result<Self, AccountError> {
        let email = EmailAddress::new(email)?;
        check_password_policy(&password)?;
        Ok(Self { email, password })
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub user_id: Uuid,
}

/// Token returned by a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenResult {
    pub access_token: String,
    pub token_type: &'static str,
}

pub const BEARER: &str = "bearer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy_accepts_valid() {
        assert!(check_password_policy("String123").is_ok());
        assert!(check_password_policy("Abcdefg1").is_ok());
    }

    #[test]
    fn test_password_policy_rejections() {
        let cases = [
            ("", PasswordPolicyError::TooShort { min: 8, actual: 0 }),
            ("abc", PasswordPolicyError::TooShort { min: 8, actual: 3 }),
            ("A1234", PasswordPolicyError::TooShort { min: 8, actual: 5 }),
            ("12345678", PasswordPolicyError::MissingUppercase),
            ("string123", PasswordPolicyError::MissingUppercase),
            ("Stringabc", PasswordPolicyError::MissingDigit),
            (
                "Abc12345678901234fbgfdestyhnmffksjndmnfsdf",
                PasswordPolicyError::TooLong { max: 32, actual: 42 },
            ),
        ];

        for (password, expected) in cases {
            assert_eq!(check_password_policy(password), Err(expected), "{password}");
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(matches!(
            EmailAddress::new(format!("{}@example.com", "a".repeat(45))),
            Err(EmailError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_email_is_case_sensitive() {
        let lower = EmailAddress::new("user@example.com".to_string()).unwrap();
        let upper = EmailAddress::new("User@example.com".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_register_command_reports_field() {
        let err = RegisterCommand::new("bad".to_string(), "String123".to_string()).unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { field: "email", .. }));

        let err = RegisterCommand::new("a@x.com".to_string(), "weak".to_string()).unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { field: "password", .. }));
    }

    #[test]
    fn test_register_command_debug_hides_password() {
        let command = RegisterCommand::new("a@x.com".to_string(), "String123".to_string()).unwrap();
        assert!(!format!("{command:?}").contains("String123"));
    }

    #[test]
    fn test_new_user_is_inactive_customer() {
        let user = User::new_inactive(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
        );
        assert!(!user.is_active);
        assert_eq!(user.role, Role::Customer);

        let view = PublicUser::from(&user);
        assert_eq!(view.id, user.id.0);
        assert!(!view.is_active);
    }

    #[test]
    fn test_public_user_serialization() {
        let user = User::new_inactive(
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "$argon2id$secret_hash".to_string(),
        );
        let json = serde_json::to_string(&PublicUser::from(&user)).unwrap();

        assert!(json.contains("\"role\":\"customer\""));
        assert!(json.contains("\"is_active\":false"));
        assert!(!json.contains("secret_hash"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("mentor".parse::<Role>(), Ok(Role::Mentor));
        assert!("owner".parse::<Role>().is_err());
    }
}
