use vigil_core::{
    Account, AccountName, AccountStore, AccountStoreError, CredentialError, CredentialHasher,
    Email, NewAccount, Password,
};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// Another account already owns this email. Detected by the store's
    /// uniqueness constraint, not by a pre-check, so concurrent registrations
    /// cannot race past it.
    #[error("email already registered")]
    EmailTaken,
    #[error("failed to hash credential: {0}")]
    Hasher(#[from] CredentialError),
    #[error("account store error: {0}")]
    Store(AccountStoreError),
}

impl From<AccountStoreError> for RegisterError {
    fn from(err: AccountStoreError) -> Self {
        match err {
            AccountStoreError::EmailTaken => Self::EmailTaken,
            other => Self::Store(other),
        }
    }
}

/// Register use case - creates a new, unverified account
pub struct RegisterUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    accounts: S,
    hasher: H,
}

impl<S, H> RegisterUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    pub fn new(accounts: S, hasher: H) -> Self {
        Self { accounts, hasher }
    }

    /// Execute the register use case
    ///
    /// Hashes the password, then inserts the account. The store assigns the
    /// id, the `Unverified` status and the registration time.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        name: AccountName,
        email: Email,
        password: Password,
    ) -> Result<Account, RegisterError> {
        let password_hash = self.hasher.hash(password).await?;

        let account = self
            .accounts
            .insert(NewAccount {
                name,
                email,
                password_hash,
            })
            .await?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use vigil_core::AccountStatus;

    use super::*;
    use crate::use_cases::test_support::{MockAccountStore, MockHasher, email, name, password};

    #[tokio::test]
    async fn registers_an_unverified_account() {
        let store = MockAccountStore::new();
        let use_case = RegisterUseCase::new(store.clone(), MockHasher);

        let account = use_case
            .execute(name("Alice"), email("a@x.com"), password("pw1"))
            .await
            .unwrap();

        assert_eq!(account.status, AccountStatus::Unverified);
        assert_eq!(account.email.as_str(), "a@x.com");
        assert!(account.last_login_at.is_none());
        assert_eq!(store.get(account.id).await.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn never_stores_the_cleartext_password() {
        let store = MockAccountStore::new();
        let use_case = RegisterUseCase::new(store.clone(), MockHasher);

        let account = use_case
            .execute(name("Alice"), email("a@x.com"), password("pw1"))
            .await
            .unwrap();

        assert_ne!(store.get(account.id).await.unwrap().password_hash, "pw1");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MockAccountStore::new();
        let use_case = RegisterUseCase::new(store, MockHasher);

        use_case
            .execute(name("Alice"), email("a@x.com"), password("pw1"))
            .await
            .unwrap();

        let result = use_case
            .execute(name("Alicia"), email("a@x.com"), password("pw2"))
            .await;
        assert!(matches!(result, Err(RegisterError::EmailTaken)));
    }

    #[tokio::test]
    async fn store_failures_are_not_conflated_with_conflicts() {
        let use_case = RegisterUseCase::new(MockAccountStore::failing(), MockHasher);

        let result = use_case
            .execute(name("Alice"), email("a@x.com"), password("pw1"))
            .await;
        assert!(matches!(result, Err(RegisterError::Store(_))));
    }
}
