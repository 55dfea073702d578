use vigil_core::{RevokedSessionStore, RevokedSessionStoreError};

/// Error types specific to the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("failed to revoke session: {0}")]
    Revocation(#[from] RevokedSessionStoreError),
}

/// Logout use case - revokes the presented session token
pub struct LogoutUseCase<R>
where
    R: RevokedSessionStore,
{
    sessions: R,
}

impl<R> LogoutUseCase<R>
where
    R: RevokedSessionStore,
{
    pub fn new(sessions: R) -> Self {
        Self { sessions }
    }

    /// Execute the logout use case
    ///
    /// After this returns, any further validation of the token fails even if
    /// its signature and expiry are still good.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, token: String) -> Result<(), LogoutError> {
        self.sessions.revoke(token).await?;
        Ok(())
    }
}
