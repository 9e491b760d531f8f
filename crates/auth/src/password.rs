//! Credential hashing.
//!
//! Argon2id with a per-credential random salt. The work factor is the
//! library default; raising it increases both login latency and brute-force
//! cost, which is the intended trade-off.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash,

    /// Covers both a malformed stored hash and a genuine mismatch, so the
    /// caller cannot tell (and leak) which it was.
    #[error("password verification failed")]
    Mismatch,
}

/// Hash a plaintext credential for storage. Only the PHC string leaves this
/// function; the plaintext is never persisted.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Verify a plaintext credential against a stored PHC hash string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::Mismatch)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("pw123456").unwrap();
        assert_ne!(hash, "pw123456");
        assert!(verify_password("pw123456", &hash).is_ok());
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("pw123456").unwrap();
        assert_eq!(
            verify_password("pw123457", &hash),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert_eq!(
            verify_password("pw123456", "not-a-phc-string"),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let a = hash_password("pw123456").unwrap();
        let b = hash_password("pw123456").unwrap();
        assert_ne!(a, b);
    }
}
