//! # Vigil - Account Lifecycle & Session Consistency Library
//!
//! This is a facade crate that re-exports the public APIs of the vigil
//! service components. Use this crate to get access to the whole account
//! service in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Account`, `Email`, `Password`, `AccountStatus`, etc.
//! - **Port traits**: `AccountStore`, `RevokedSessionStore`, `CredentialHasher`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `BulkActionUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `RedisRevokedSessionStore`,
//!   `Argon2CredentialHasher`, `SessionManager`, etc.
//! - **Service**: `VigilService` - the composed HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use vigil_core::*;
}

// Re-export most commonly used core types at the root level
pub use vigil_core::{
    Account, AccountError, AccountId, AccountName, AccountStatus, BulkAction, Email, NewAccount,
    Password,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use vigil_core::{
        AccountStore, AccountStoreError, CredentialError, CredentialHasher, RevokedSessionStore,
        RevokedSessionStoreError,
    };
}

// Re-export port traits at root level
pub use vigil_core::{
    AccountStore, AccountStoreError, CredentialError, CredentialHasher, RevokedSessionStore,
    RevokedSessionStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use vigil_application::*;
}

// Re-export use cases at root level
pub use vigil_application::{
    BulkActionUseCase, ListAccountsUseCase, LoginUseCase, LogoutUseCase, RegisterUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use vigil_adapters::persistence::*;
    }

    /// Session issuing and validation
    pub mod session {
        pub use vigil_adapters::session::*;
    }

    /// Credential hashing
    pub mod password {
        pub use vigil_adapters::password::*;
    }

    /// Configuration
    pub mod config {
        pub use vigil_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use vigil_adapters::{
    Argon2CredentialHasher, HashSetRevokedSessionStore, InMemoryAccountStore,
    PostgresAccountStore, RedisRevokedSessionStore, SessionClaims, SessionConfig, SessionError,
    SessionManager, Settings,
};

// ============================================================================
// Vigil Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use vigil_service::{VigilService, configure_postgresql, configure_redis, get_redis_client};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
