use chrono::Utc;
use vigil_core::{
    Account, AccountStatus, AccountStore, AccountStoreError, CredentialError, CredentialHasher,
    Email, Password,
};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password collapse into this one variant so a
    /// caller cannot probe which emails are registered.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is blocked")]
    Blocked,
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("credential verification failed: {0}")]
    Hasher(CredentialError),
}

/// Login use case - checks credentials and records the login time
pub struct LoginUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    accounts: S,
    hasher: H,
}

impl<S, H> LoginUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    pub fn new(accounts: S, hasher: H) -> Self {
        Self { accounts, hasher }
    }

    /// Execute the login use case
    ///
    /// Credential order matters: the password is verified before the status
    /// check, so a wrong password on a blocked account still reads as
    /// invalid credentials. A blocked login never touches `last_login_at`.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: &Email, password: Password) -> Result<Account, LoginError> {
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            // Burn a verification so this path costs the same as a mismatch.
            self.hasher.verify_dummy(password).await;
            return Err(LoginError::InvalidCredentials);
        };

        match self.hasher.verify(&account.password_hash, password).await {
            Ok(()) => {}
            Err(CredentialError::Mismatch) => return Err(LoginError::InvalidCredentials),
            Err(other) => return Err(LoginError::Hasher(other)),
        }

        if account.status == AccountStatus::Blocked {
            return Err(LoginError::Blocked);
        }

        let now = Utc::now();
        self.accounts.record_login(account.id, now).await?;
        account.last_login_at = Some(now);

        Ok(account)
    }
}
