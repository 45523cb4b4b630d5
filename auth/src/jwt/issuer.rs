use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::TokenKind;
use super::codec::TokenCodec;
use super::errors::JwtError;

/// Default validity window per token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
    pub one_time: Duration,
}

impl TokenLifetimes {
    pub fn for_kind(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
            TokenKind::OneTime => self.one_time,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(5),
            refresh: Duration::days(7),
            one_time: Duration::minutes(3),
        }
    }
}

/// Builds and signs claims of each kind.
///
/// Issuing never touches storage; the only output is the token string.
#[derive(Clone)]
pub struct TokenIssuer {
    codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    pub fn new(codec: TokenCodec, lifetimes: TokenLifetimes) -> Self {
        Self { codec, lifetimes }
    }

    pub fn lifetimes(&self) -> &TokenLifetimes {
        &self.lifetimes
    }

    /// Issue a token with the default lifetime for `kind`.
    pub fn issue(&self, user_id: Uuid, kind: TokenKind) -> Result<String, JwtError> {
        self.issue_with_lifetime(user_id, kind, self.lifetimes.for_kind(kind))
    }

    /// Issue a token with an explicit lifetime. Negative lifetimes produce
    /// tokens that are already expired.
    pub fn issue_with_lifetime(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        lifetime: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(user_id, kind, lifetime, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, kind, lifetime, now);
        let token = self.codec.encode(&claims)?;
        tracing::debug!(user_id = %user_id, kind = %kind, exp = claims.exp, "token signed");
        Ok(token)
    }
}
