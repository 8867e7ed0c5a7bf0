/// Password hashing capability
///
/// Credential verification delegates hashing to the [`PasswordHasher`] trait
/// so stores and tests can swap implementations. The production
/// implementation is [`Argon2Hasher`], using Argon2id (memory-hard, winner
/// of the Password Hashing Competition).
///
/// # Parameters
///
/// - **Memory**: 64 MB (65536 KiB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash, emitted as a PHC string
///
/// # Example
///
/// ```
/// use turnstile_core::auth::password::{Argon2Hasher, PasswordHasher};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("super_secret_password")?;
///
/// assert!(hasher.matches("super_secret_password", &hash)?);
/// assert!(!hasher.matches("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash a password.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// Verification failed for a reason other than a wrong password.
    #[error("failed to verify password: {0}")]
    Verify(String),

    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {0}")]
    InvalidHash(String),
}

/// Hashes secrets and checks presented secrets against stored hashes.
///
/// `matches` must distinguish "wrong password" (`Ok(false)`) from operational
/// failures (`Err`): the former is an expected outcome reported to callers as
/// invalid credentials, the latter is an internal error.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext secret for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Checks a plaintext secret against a stored hash in constant time.
    fn matches(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id implementation of [`PasswordHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    fn argon2() -> Result<Argon2<'static>, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(65536) // 64 MB
            .t_cost(3) // 3 iterations
            .p_cost(4) // 4 lanes
            .output_len(32)
            .build()
            .map_err(|e| PasswordError::Hash(format!("invalid parameters: {}", e)))?;

        Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(format!("hash generation failed: {}", e)))?;

        Ok(hash.to_string())
    }

    fn matches(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        // Parameters are embedded in the PHC string, so the default instance
        // verifies hashes produced with any cost settings.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::Verify(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_emits_phc_format_with_parameters() {
        let hash = Argon2Hasher.hash("test_password_123").expect("hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = Argon2Hasher.hash("same_password").expect("hash should succeed");
        let second = Argon2Hasher.hash("same_password").expect("hash should succeed");

        // Fresh random salt every time.
        assert_ne!(first, second);
    }

    #[test]
    fn test_matches_distinguishes_right_from_wrong() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("correct_password").expect("hash should succeed");

        assert!(hasher.matches("correct_password", &hash).unwrap());
        assert!(!hasher.matches("wrong_password", &hash).unwrap());
        assert!(!hasher.matches("", &hash).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        let result = Argon2Hasher.matches("password", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
