use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Purpose a token was issued for.
///
/// Every token carries exactly one kind; guards compare it against the kind
/// they were built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Short-lived token presented on protected operations.
    Access,
    /// Long-lived token exchanged for a new access token.
    Refresh,
    /// Email verification and password reset links.
    OneTime,
}

impl TokenKind {
    pub const ALL: [TokenKind; 3] = [TokenKind::Access, TokenKind::Refresh, TokenKind::OneTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::OneTime => "one-time",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed token payload.
///
/// `exp` is mandatory: there is no way to build or decode claims without an
/// expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: Uuid,

    /// Token kind discriminant
    pub token_type: TokenKind,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims expiring `lifetime` after `now`.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `token_type` - Kind of token
    /// * `lifetime` - Validity window, may be negative
    /// * `now` - Issuance time
    pub fn new(user_id: Uuid, token_type: TokenKind, lifetime: Duration, now: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            token_type,
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Expiration as a UTC timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
