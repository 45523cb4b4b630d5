use thiserror::Error;

/// Failure while hashing or checking a password.
///
/// A wrong password is not an error; `verify` returns `Ok(false)` for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unusable: {0}")]
    VerificationFailed(String),
}
