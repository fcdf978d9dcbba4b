use crate::types::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// One-way password hashing and verification.
///
/// Uses Argon2id with a fresh random salt per call, so hashing the same
/// password twice yields different digests.
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialHasher;

impl CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes a password, returning a PHC-formatted digest string.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a password against a stored digest.
    ///
    /// Never errors: a malformed digest is treated as a non-match.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_formatted() {
        let hasher = CredentialHasher::new();
        let password = "Secret123!";

        let digest = hasher.hash(password).expect("should hash password");

        assert_ne!(digest, password);
        assert!(
            digest.starts_with("$argon2"),
            "digest should be in PHC format"
        );
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = CredentialHasher::new();

        let first = hasher.hash("Secret123!").expect("should hash");
        let second = hasher.hash("Secret123!").expect("should hash");

        assert_ne!(first, second, "salt should be random per call");
    }

    #[test]
    fn test_verify_roundtrip() {
        let hasher = CredentialHasher::new();
        let digest = hasher.hash("Secret123!").expect("should hash");

        assert!(hasher.verify("Secret123!", &digest));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = CredentialHasher::new();
        let digest = hasher.hash("Secret123!").expect("should hash");

        assert!(!hasher.verify("secret123!", &digest));
        assert!(!hasher.verify("Secret123", &digest));
    }

    #[test]
    fn test_verify_rejects_digest_of_other_password() {
        let hasher = CredentialHasher::new();
        let other = hasher.hash("SomethingElse9#").expect("should hash");

        assert!(!hasher.verify("Secret123!", &other));
    }

    #[test]
    fn test_malformed_digest_is_non_match() {
        let hasher = CredentialHasher::new();

        assert!(!hasher.verify("Secret123!", "not-a-phc-digest"));
        assert!(!hasher.verify("Secret123!", ""));
    }
}
