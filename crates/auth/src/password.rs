use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// Argon2id password hashing for account credentials.
///
/// Output is an opaque PHC-format string; verification never reveals *why*
/// a candidate failed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordVault;

impl PasswordVault {
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError(e.to_string()))
    }

    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
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
    fn hash_verifies_original_password() {
        let vault = PasswordVault::new();
        let hash = vault.hash("hunter2").unwrap();
        assert!(vault.verify("hunter2", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let vault = PasswordVault::new();
        let hash = vault.hash("hunter2").unwrap();
        assert!(!vault.verify("hunter3", &hash));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        let vault = PasswordVault::new();
        assert!(!vault.verify("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn hashes_are_salted() {
        let vault = PasswordVault::new();
        let a = vault.hash("hunter2").unwrap();
        let b = vault.hash("hunter2").unwrap();
        assert_ne!(a, b);
    }
}
