pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    AccountError,
    account::{Account, AccountId, AccountName, AccountStatus, BulkAction, NewAccount},
    email::Email,
    password::Password,
};

pub use ports::{
    hasher::{CredentialError, CredentialHasher},
    stores::{
        AccountStore, AccountStoreError, RevokedSessionStore, RevokedSessionStoreError,
    },
};
