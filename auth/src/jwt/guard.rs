use chrono::DateTime;
use chrono::Utc;

use super::claims::Claims;
use super::claims::TokenKind;
use super::codec::TokenCodec;
use super::errors::JwtError;

/// "Require a token of this kind" check.
///
/// A guard is bound to exactly one [`TokenKind`] at construction and rejects
/// every other kind, even when the signature and expiry are fine.
#[derive(Clone)]
pub struct TokenGuard {
    codec: TokenCodec,
    required: TokenKind,
}

impl TokenGuard {
    pub fn new(codec: TokenCodec, required: TokenKind) -> Self {
        Self { codec, required }
    }

    /// Guard for protected operations.
    pub fn access(codec: TokenCodec) -> Self {
        Self::new(codec, TokenKind::Access)
    }

    /// Guard for the refresh operation.
    pub fn refresh(codec: TokenCodec) -> Self {
        Self::new(codec, TokenKind::Refresh)
    }

    /// Guard for email verification and password reset.
    pub fn one_time(codec: TokenCodec) -> Self {
        Self::new(codec, TokenKind::OneTime)
    }

    pub fn required_kind(&self) -> TokenKind {
        self.required
    }

    /// Verify a raw token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` / `TokenExpired` - Token failed to decode
    /// * `WrongTokenKind` - Token is valid but was issued for another purpose
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a raw token, checking expiry against `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims = self.codec.decode_at(token, now).map_err(|e| {
            tracing::debug!(required = %self.required, error = %e, "token rejected");
            e
        })?;

        if claims.token_type != self.required {
            tracing::debug!(
                required = %self.required,
                found = %claims.token_type,
                user_id = %claims.sub,
                "token kind mismatch"
            );
            return Err(JwtError::WrongTokenKind {
                expected: self.required,
                found: claims.token_type,
            });
        }

        tracing::debug!(user_id = %claims.sub, kind = %claims.token_type, "token verified");
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::issuer::TokenIssuer;
    use crate::jwt::issuer::TokenLifetimes;

    const SECRET: &[u8] = b"guard_secret_key_at_least_32_bytes!!";

    fn setup() -> (TokenIssuer, [TokenGuard; 3]) {
        let codec = TokenCodec::new(SECRET);
        let issuer = TokenIssuer::new(codec.clone(), TokenLifetimes::default());
        let guards = [
            TokenGuard::access(codec.clone()),
            TokenGuard::refresh(codec.clone()),
            TokenGuard::one_time(codec),
        ];
        (issuer, guards)
    }

    #[test]
    fn test_guard_kind_matrix() {
        let (issuer, guards) = setup();
        let user_id = Uuid::new_v4();
        let mut accepted = 0;
        let mut rejected = 0;

        for kind in TokenKind::ALL {
            let token = issuer.issue(user_id, kind).unwrap();
            for guard in &guards {
                match guard.verify(&token) {
                    Ok(claims) => {
                        assert_eq!(guard.required_kind(), kind);
                        assert_eq!(claims.sub, user_id);
                        accepted += 1;
                    }
                    Err(err) => {
                        assert_ne!(guard.required_kind(), kind);
                        assert_eq!(
                            err,
                            JwtError::WrongTokenKind {
                                expected: guard.required_kind(),
                                found: kind,
                            }
                        );
                        rejected += 1;
                    }
                }
            }
        }

        assert_eq!(accepted, 3);
        assert_eq!(rejected, 6);
    }

    #[test]
    fn test_refresh_guard_rejects_access_token() {
        let (issuer, [_, refresh, _]) = setup();
        let token = issuer.issue(Uuid::new_v4(), TokenKind::Access).unwrap();

        let err = refresh.verify(&token).unwrap_err();
        assert!(!err.is_invalid_credential());
        assert!(err.to_string().contains("Expected refresh token"));
    }

    #[test]
    fn test_expired_token_is_invalid_not_wrong_kind() {
        let (issuer, [access, _, _]) = setup();
        let token = issuer
            .issue_with_lifetime(Uuid::new_v4(), TokenKind::Refresh, Duration::seconds(-1))
            .unwrap();

        // Decode failure is reported before the kind comparison.
        assert_eq!(access.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let (_, [access, refresh, one_time]) = setup();
        for guard in [access, refresh, one_time] {
            assert!(matches!(
                guard.verify("not-a-token"),
                Err(JwtError::InvalidToken(_))
            ));
        }
    }

    #[test]
    fn test_verify_at_fixed_clock() {
        let (issuer, [_, _, one_time]) = setup();
        let now = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
        let token = issuer
            .issue_at(Uuid::new_v4(), TokenKind::OneTime, Duration::minutes(3), now)
            .unwrap();

        assert!(one_time.verify_at(&token, now + Duration::minutes(3)).is_ok());
        assert_eq!(
            one_time.verify_at(&token, now + Duration::minutes(4)),
            Err(JwtError::TokenExpired)
        );
    }
}
