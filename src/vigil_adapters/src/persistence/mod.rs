pub mod hashset_revoked_session_store;
pub mod in_memory_account_store;
pub mod postgres_account_store;
pub mod redis_revoked_session_store;

pub use hashset_revoked_session_store::HashSetRevokedSessionStore;
pub use in_memory_account_store::InMemoryAccountStore;
pub use postgres_account_store::PostgresAccountStore;
pub use redis_revoked_session_store::RedisRevokedSessionStore;
