use vigil_core::{Account, AccountStore, AccountStoreError};

/// List accounts use case - the admin index view
pub struct ListAccountsUseCase<S>
where
    S: AccountStore,
{
    accounts: S,
}

impl<S> ListAccountsUseCase<S>
where
    S: AccountStore,
{
    pub fn new(accounts: S) -> Self {
        Self { accounts }
    }

    /// All accounts, most recently logged in first; accounts that never
    /// logged in sort last.
    #[tracing::instrument(name = "ListAccountsUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<Account>, AccountStoreError> {
        self.accounts.all_by_last_login().await
    }
}
