//! Credential primitives for the account lifecycle
//!
//! Provides the pieces every account flow is built from:
//! - Password hashing (Argon2id)
//! - Typed, signed, time-bounded tokens (access, refresh, one-time)
//! - Guards that accept exactly one token kind
//! - An `Authenticator` tying them together behind one signing key
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("String123").unwrap();
//! assert!(hasher.verify("String123", &hash).unwrap());
//! ```
//!
//! ## Tokens and Guards
//! ```
//! use auth::{TokenCodec, TokenGuard, TokenIssuer, TokenKind, TokenLifetimes};
//! use uuid::Uuid;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let issuer = TokenIssuer::new(codec.clone(), TokenLifetimes::default());
//! let token = issuer.issue(Uuid::new_v4(), TokenKind::Refresh).unwrap();
//!
//! assert!(TokenGuard::refresh(codec.clone()).verify(&token).is_ok());
//! assert!(TokenGuard::access(codec).verify(&token).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenKind, TokenLifetimes};
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", TokenLifetimes::default());
//!
//! // Register: hash password
//! let hash = auth.hash_password("String123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let result = auth.authenticate("String123", &hash, user_id).unwrap();
//!
//! // Protected call: require an access token
//! let claims = auth.validate_token(&result.access_token, TokenKind::Access).unwrap();
//! assert_eq!(claims.sub, user_id);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenGuard;
pub use jwt::TokenIssuer;
pub use jwt::TokenKind;
pub use jwt::TokenLifetimes;
pub use password::PasswordError;
pub use password::PasswordHasher;
