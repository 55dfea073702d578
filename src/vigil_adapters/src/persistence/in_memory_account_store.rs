use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use vigil_core::{
    Account, AccountId, AccountStatus, AccountStore, AccountStoreError, Email, NewAccount,
};

/// In-memory account store for tests and local runs.
///
/// The single map lock stands in for the database's per-row atomicity: every
/// mutation happens under the write guard, so concurrent bulk actions cannot
/// interleave within one record.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountStoreError::EmailTaken);
        }

        let account = Account {
            id: AccountId::new(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            status: AccountStatus::Unverified,
            last_login_at: None,
            registered_at: Utc::now(),
        };
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn all_by_last_login(&self) -> Result<Vec<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        // Descending on Option<DateTime> puts None (never logged in) last.
        all.sort_by(|a, b| {
            b.last_login_at
                .cmp(&a.last_login_at)
                .then(b.registered_at.cmp(&a.registered_at))
        });
        Ok(all)
    }

    async fn record_login(
        &self,
        id: AccountId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or(AccountStoreError::NotFound)?;
        account.last_login_at = Some(at);
        Ok(())
    }

    async fn set_status(
        &self,
        ids: &[AccountId],
        status: AccountStatus,
    ) -> Result<u64, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let mut updated = 0;
        for id in ids {
            if let Some(account) = accounts.get_mut(id) {
                account.status = status;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, ids: &[AccountId]) -> Result<u64, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let mut removed = 0;
        for id in ids {
            if accounts.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn delete_unverified(&self) -> Result<u64, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|_, a| a.status != AccountStatus::Unverified);
        Ok((before - accounts.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use vigil_core::AccountName;

    use super::*;

    fn new_account(addr: &str) -> NewAccount {
        NewAccount {
            name: AccountName::parse("User").unwrap(),
            email: Email::parse(addr).unwrap(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_enforces_email_uniqueness() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("a@x.com")).await.unwrap();

        let result = store.insert(new_account("a@x.com")).await;
        assert_eq!(result.unwrap_err(), AccountStoreError::EmailTaken);
    }

    #[tokio::test]
    async fn record_login_on_missing_account_is_not_found() {
        let store = InMemoryAccountStore::new();
        let result = store.record_login(AccountId::new(), Utc::now()).await;
        assert_eq!(result.unwrap_err(), AccountStoreError::NotFound);
    }

    #[tokio::test]
    async fn listing_puts_never_logged_in_accounts_last() {
        let store = InMemoryAccountStore::new();
        let logged_in = store.insert(new_account("a@x.com")).await.unwrap();
        let never = store.insert(new_account("b@x.com")).await.unwrap();
        store.record_login(logged_in.id, Utc::now()).await.unwrap();

        let all = store.all_by_last_login().await.unwrap();
        assert_eq!(all[0].id, logged_in.id);
        assert_eq!(all[1].id, never.id);
    }
}
