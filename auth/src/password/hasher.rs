use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way salted password hashing (Argon2id).
///
/// Stored hashes are PHC strings and must only ever be checked through
/// [`PasswordHasher::verify`], never compared directly.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls with the same plaintext yield different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "argon2 hash_password error");
                PasswordError::HashingFailed(e.to_string())
            })
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// The digest comparison inside `argon2` is constant-time.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::error!(error = %e, "argon2 parse hash error");
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "String123";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("String124", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("String123").unwrap();
        let second = hasher.hash("String123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("String123", &first).unwrap());
        assert!(hasher.verify("String123", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Plaintext99").unwrap();
        assert!(!hash.contains("Plaintext99"));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }
}
