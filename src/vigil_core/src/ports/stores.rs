use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::account::{Account, AccountId, AccountStatus, NewAccount};
use crate::domain::email::Email;

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    /// The storage-level uniqueness constraint on email was violated.
    /// Surfaced to the caller as "email already exists", never as a crash.
    #[error("email already registered")]
    EmailTaken,
    #[error("account not found")]
    NotFound,
    #[error("unexpected store error: {0}")]
    Unexpected(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::NotFound, Self::NotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Durable keyed storage for account records.
///
/// The store enforces the uniqueness constraint on email and provides
/// per-record atomicity for every mutation; callers rely on that instead of
/// application-level locks. Bulk operations return the number of records
/// actually touched so unknown ids can be skipped silently.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account with status `Unverified` and a fresh id.
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError>;

    /// All accounts ordered by `last_login_at` descending, accounts that
    /// never logged in last.
    async fn all_by_last_login(&self) -> Result<Vec<Account>, AccountStoreError>;

    /// Record a successful login time for one account.
    async fn record_login(&self, id: AccountId, at: DateTime<Utc>)
    -> Result<(), AccountStoreError>;

    /// Set the status of every listed account that exists; returns how many
    /// records were updated.
    async fn set_status(
        &self,
        ids: &[AccountId],
        status: AccountStatus,
    ) -> Result<u64, AccountStoreError>;

    /// Permanently delete every listed account that exists; returns how many
    /// records were removed.
    async fn delete(&self, ids: &[AccountId]) -> Result<u64, AccountStoreError>;

    /// Permanently delete every account with status `Unverified`; returns how
    /// many records were removed. Idempotent.
    async fn delete_unverified(&self) -> Result<u64, AccountStoreError>;
}

// RevokedSessionStore port trait and errors
#[derive(Debug, Error)]
pub enum RevokedSessionStoreError {
    #[error("revocation store error: {0}")]
    Store(String),
}

/// Set of session tokens that must no longer validate.
///
/// Entries only need to outlive the token's own expiry; implementations may
/// expire them after that window.
#[async_trait]
pub trait RevokedSessionStore: Send + Sync {
    async fn revoke(&self, token: String) -> Result<(), RevokedSessionStoreError>;
    async fn contains(&self, token: &str) -> Result<bool, RevokedSessionStoreError>;
}
