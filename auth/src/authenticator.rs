use chrono::Duration;
use uuid::Uuid;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenGuard;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKind;
use crate::jwt::TokenLifetimes;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing, token issuance and
/// the three token guards.
///
/// All parts share one signing key. Built once from configuration and shared
/// behind an `Arc` by the services that need it.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    access_guard: TokenGuard,
    refresh_guard: TokenGuard,
    one_time_guard: TokenGuard,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `lifetimes` - Default lifetime per token kind
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        let codec = TokenCodec::new(jwt_secret);
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(codec.clone(), lifetimes),
            access_guard: TokenGuard::access(codec.clone()),
            refresh_guard: TokenGuard::refresh(codec.clone()),
            one_time_guard: TokenGuard::one_time(codec),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access/refresh pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(AuthenticationResult {
            access_token: self.issuer.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issuer.issue(user_id, TokenKind::Refresh)?,
        })
    }

    /// Issue a token of `kind` with its default lifetime.
    pub fn issue_token(&self, user_id: Uuid, kind: TokenKind) -> Result<String, JwtError> {
        self.issuer.issue(user_id, kind)
    }

    /// Issue a token with an explicit lifetime.
    pub fn issue_token_with_lifetime(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        lifetime: Duration,
    ) -> Result<String, JwtError> {
        self.issuer.issue_with_lifetime(user_id, kind, lifetime)
    }

    /// Guard accepting only tokens of `kind`.
    pub fn guard(&self, kind: TokenKind) -> &TokenGuard {
        match kind {
            TokenKind::Access => &self.access_guard,
            TokenKind::Refresh => &self.refresh_guard,
            TokenKind::OneTime => &self.one_time_guard,
        }
    }

    /// Validate a token that must be of `kind`.
    pub fn validate_token(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        self.guard(kind).verify(token)
    }
}
