use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs claims into compact tokens and verifies them back.
///
/// Uses HS256 (HMAC with SHA-256). Cloning shares nothing mutable, so the
/// issuer and every guard can hold their own copy of the same keys.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and verify a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch, malformed token or missing claims
    /// * `TokenExpired` - `exp` is in the past
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_at(token, Utc::now())
    }

    /// Decode and verify a token, checking expiry against `now`.
    ///
    /// The signature is always checked before the expiry, so a forged token
    /// is reported as invalid even when its `exp` is also in the past.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock, without leeway.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
