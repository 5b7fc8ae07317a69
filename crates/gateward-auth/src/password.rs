//! Password verification.
//!
//! Credential checking sits behind [`CredentialVerifier`] so the auth
//! service never sees hashing details. [`Argon2Verifier`] is the default
//! implementation over Argon2id PHC strings.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use async_trait::async_trait;

use crate::error::{AuthError, AuthResult};

/// Verifies a presented password against a stored hash.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` if `password` matches `stored_hash`.
    ///
    /// A malformed stored hash must yield `Ok(false)`, not an error, so
    /// that a corrupted record is indistinguishable from a wrong
    /// password at the login boundary.
    async fn verify(&self, password: &str, stored_hash: &str) -> AuthResult<bool>;
}

/// Argon2id verifier over PHC-format hash strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl Argon2Verifier {
    /// Creates a verifier with default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hashes a password into a PHC string, for seeding stores.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if hashing fails.
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::storage(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }
}

#[async_trait]
impl CredentialVerifier for Argon2Verifier {
    async fn verify(&self, password: &str, stored_hash: &str) -> AuthResult<bool> {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            // Corrupted or legacy hash: fail closed, same as a mismatch.
            tracing::warn!("Stored password hash is not a valid PHC string");
            return Ok(false);
        };

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
