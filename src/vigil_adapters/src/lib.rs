pub mod config;
pub mod password;
pub mod persistence;
pub mod session;

pub use self::config::{Settings, constants};
pub use password::Argon2CredentialHasher;
pub use persistence::{
    HashSetRevokedSessionStore, InMemoryAccountStore, PostgresAccountStore,
    RedisRevokedSessionStore,
};
pub use session::{SessionClaims, SessionConfig, SessionError, SessionManager};
