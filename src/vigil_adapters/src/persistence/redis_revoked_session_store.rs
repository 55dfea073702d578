use std::sync::Arc;

use redis::{Commands, Connection};
use tokio::sync::RwLock;
use vigil_core::{RevokedSessionStore, RevokedSessionStoreError};

/// Redis-backed revocation set shared across service instances.
///
/// Entries carry a TTL: a revocation only has to outlive the token's own
/// expiry window, so `token_ttl` is set to the absolute session cap.
#[derive(Clone)]
pub struct RedisRevokedSessionStore {
    conn: Arc<RwLock<Connection>>,
    token_ttl: u64,
}

impl RedisRevokedSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>, token_ttl: u64) -> Self {
        Self { conn, token_ttl }
    }
}

#[async_trait::async_trait]
impl RevokedSessionStore for RedisRevokedSessionStore {
    async fn revoke(&self, token: String) -> Result<(), RevokedSessionStoreError> {
        let key = get_key(&token);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, self.token_ttl)
            .map_err(|e| RevokedSessionStoreError::Store(e.to_string()))
    }

    async fn contains(&self, token: &str) -> Result<bool, RevokedSessionStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| RevokedSessionStoreError::Store(e.to_string()))
    }
}

// Key prefix to prevent collisions with other data in the same Redis.
const REVOKED_SESSION_KEY_PREFIX: &str = "revoked_session:";

fn get_key(token: &str) -> String {
    format!("{}{}", REVOKED_SESSION_KEY_PREFIX, token)
}
