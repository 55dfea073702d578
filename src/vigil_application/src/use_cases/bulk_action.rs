use vigil_core::{AccountId, AccountStatus, AccountStore, AccountStoreError, BulkAction};

/// Error types specific to the bulk action use case
#[derive(Debug, thiserror::Error)]
pub enum BulkActionError {
    /// A store fault mid-action. `applied` reports how many records were
    /// durably updated before the fault, so callers can surface a partial
    /// application instead of silently assuming success.
    #[error("account store error after {applied} applied updates: {source}")]
    Store {
        applied: u64,
        source: AccountStoreError,
    },
}

/// Bulk action use case - administrator lifecycle transitions over a set of
/// accounts
///
/// Unknown ids are skipped, not errors; each record update is atomic in the
/// store but the batch as a whole is not required to be.
pub struct BulkActionUseCase<S>
where
    S: AccountStore,
{
    accounts: S,
}

impl<S> BulkActionUseCase<S>
where
    S: AccountStore,
{
    pub fn new(accounts: S) -> Self {
        Self { accounts }
    }

    /// Execute the bulk action use case, returning how many accounts were
    /// affected.
    ///
    /// `DeleteUnverified` ignores `target_ids`. For the targeted actions an
    /// empty id list is a no-op, not an error.
    #[tracing::instrument(name = "BulkActionUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        action: BulkAction,
        target_ids: &[AccountId],
    ) -> Result<u64, BulkActionError> {
        let result = match action {
            BulkAction::DeleteUnverified => self.accounts.delete_unverified().await,
            _ if target_ids.is_empty() => Ok(0),
            BulkAction::Block => {
                self.accounts
                    .set_status(target_ids, AccountStatus::Blocked)
                    .await
            }
            BulkAction::Unblock => {
                self.accounts
                    .set_status(target_ids, AccountStatus::Active)
                    .await
            }
            BulkAction::Delete => self.accounts.delete(target_ids).await,
        };

        // The stores apply each action as one atomic statement, so a fault
        // means nothing from this call was applied.
        result.map_err(|source| BulkActionError::Store { applied: 0, source })
    }
}
