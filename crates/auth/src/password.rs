//! Password hashing and verification (Argon2id, PHC strings).
//!
//! Hashing is deliberately expensive (memory-hard work factor) to resist
//! offline brute force. Verification decodes the stored PHC string and lets
//! the `argon2` crate perform the digest comparison, which does not leak the
//! failing byte position.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

/// Hashing failure. Carries no plaintext and no hash material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("failed to generate salt")]
    Salt,

    #[error("failed to hash password")]
    Hash,
}

/// Hash a plaintext password into a PHC-encoded string.
///
/// The encoding includes a random 16-byte salt, so two hashes of the same
/// plaintext are never equal; only [`verify_password`] can relate them.
pub fn hash_password(plaintext: &str) -> Result<String, HashError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| HashError::Salt)?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|_| HashError::Salt)?;

    let phc = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|_| HashError::Hash)?
        .to_string();
    Ok(phc)
}

/// Verify a plaintext password against a stored PHC string.
///
/// A malformed stored hash (e.g. a corrupted record) returns `false` rather
/// than an error; callers must treat that identically to a wrong password to
/// avoid oracle behaviour.
pub fn verify_password(plaintext: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_hashed_plaintext() {
        let phc = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &phc));
    }

    #[test]
    fn verify_rejects_a_different_plaintext() {
        let phc = hash_password("secret1").unwrap();
        assert!(!verify_password("secret2", &phc));
        assert!(!verify_password("", &phc));
    }

    #[test]
    fn hashing_is_salted() {
        // Same plaintext, different encodings; both verify.
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret1", &a));
        assert!(verify_password("secret1", &b));
    }

    #[test]
    fn hash_is_never_the_plaintext() {
        let phc = hash_password("secret1").unwrap();
        assert_ne!(phc, "secret1");
        assert!(phc.starts_with("$argon2"));
    }

    #[test]
    fn malformed_stored_hash_reads_as_wrong_password() {
        assert!(!verify_password("secret1", ""));
        assert!(!verify_password("secret1", "not-a-phc-string"));
        assert!(!verify_password("secret1", "$argon2id$v=19$truncated"));
    }
}
