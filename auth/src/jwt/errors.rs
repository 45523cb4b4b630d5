use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Expected {expected} token, got {found} token")]
    WrongTokenKind { expected: TokenKind, found: TokenKind },
}

impl JwtError {
    /// True for failures of the token itself (bad signature, corrupt, expired),
    /// as opposed to a valid token presented for the wrong purpose.
    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, JwtError::InvalidToken(_) | JwtError::TokenExpired)
    }
}
