use auth::JwtError;
use auth::PasswordError;
use auth::TokenKind;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct RoleError(pub String);

/// Error for outbound email delivery
#[derive(Debug, Clone, Error)]
pub enum EmailDeliveryError {
    #[error("Invalid email address: {0}")]
    Address(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Expected outcomes, surfaced to the caller as-is
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: &'static str, reason: String },

    #[error("Email already exists")]
    EmailAlreadyActive,

    #[error("Account is already active")]
    AlreadyActive,

    #[error("Could not validate credentials")]
    InvalidCredential,

    #[error("Could not validate credentials. Expected {expected} token, got {found} token")]
    WrongCredentialKind { expected: TokenKind, found: TokenKind },

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is not active")]
    AccountInactive,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Incorrect old password")]
    IncorrectOldPassword,

    // Infrastructure errors
    #[error("Email already exists in storage: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccountError {
    /// True for the fixed set of outcomes a caller is expected to handle.
    /// Everything else is a fault the core does not mask.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AccountError::ValidationFailed { .. }
                | AccountError::EmailAlreadyActive
                | AccountError::AlreadyActive
                | AccountError::InvalidCredential
                | AccountError::WrongCredentialKind { .. }
                | AccountError::AccountNotFound
                | AccountError::AccountInactive
                | AccountError::InvalidCredentials
                | AccountError::IncorrectOldPassword
        )
    }
}

impl From<JwtError> for AccountError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken(_) | JwtError::TokenExpired => AccountError::InvalidCredential,
            JwtError::WrongTokenKind { expected, found } => {
                AccountError::WrongCredentialKind { expected, found }
            }
            JwtError::EncodingFailed(msg) => AccountError::TokenIssuance(msg),
        }
    }
}

impl From<EmailError> for AccountError {
    fn from(err: EmailError) -> Self {
        AccountError::ValidationFailed {
            field: "email",
            reason: err.to_string(),
        }
    }
}

impl From<PasswordPolicyError> for AccountError {
    fn from(err: PasswordPolicyError) -> Self {
        AccountError::ValidationFailed {
            field: "password",
            reason: err.to_string(),
        }
    }
}

impl From<RoleError> for AccountError {
    fn from(err: RoleError) -> Self {
        AccountError::DatabaseError(err.to_string())
    }
}
