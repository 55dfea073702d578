use async_trait::async_trait;
use thiserror::Error;

use crate::domain::password::Password;

#[derive(Debug, Error)]
pub enum CredentialError {
    /// The candidate password does not match the stored hash.
    #[error("credential mismatch")]
    Mismatch,
    #[error("unexpected hashing error: {0}")]
    Unexpected(String),
}

/// One-way credential hashing and constant-time verification.
///
/// Cleartext passwords never reach the account store: registration hashes
/// through this port and login verifies through it.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted one-way hash of the password, in a self-describing
    /// format `verify` understands.
    async fn hash(&self, password: Password) -> Result<String, CredentialError>;

    /// Verify a candidate password against a stored hash.
    /// Returns `CredentialError::Mismatch` when they do not match.
    async fn verify(&self, expected_hash: &str, candidate: Password)
    -> Result<(), CredentialError>;

    /// Burn a verification against a throwaway hash.
    ///
    /// Called on the unknown-email login path so that "no such account" and
    /// "wrong password" take the same time; the outcome is discarded.
    async fn verify_dummy(&self, _candidate: Password) {}
}
