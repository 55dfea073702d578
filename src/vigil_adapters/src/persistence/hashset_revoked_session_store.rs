use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use vigil_core::{RevokedSessionStore, RevokedSessionStoreError};

/// In-process revocation set, used by tests and single-node local runs.
/// Entries live until the process exits, which always outlasts token expiry.
#[derive(Debug, Default, Clone)]
pub struct HashSetRevokedSessionStore {
    revoked_tokens: Arc<RwLock<HashSet<String>>>,
}

impl HashSetRevokedSessionStore {
    pub fn new() -> Self {
        Self {
            revoked_tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait::async_trait]
impl RevokedSessionStore for HashSetRevokedSessionStore {
    async fn revoke(&self, token: String) -> Result<(), RevokedSessionStoreError> {
        let mut revoked_tokens = self.revoked_tokens.write().await;
        revoked_tokens.insert(token);
        Ok(())
    }

    async fn contains(&self, token: &str) -> Result<bool, RevokedSessionStoreError> {
        let revoked_tokens = self.revoked_tokens.read().await;
        Ok(revoked_tokens.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoked_token_is_contained() {
        let store = HashSetRevokedSessionStore::new();
        store.revoke("token1".to_string()).await.unwrap();
        assert!(store.contains("token1").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_token_is_not_contained() {
        let store = HashSetRevokedSessionStore::new();
        assert!(!store.contains("token2").await.unwrap());
    }
}
