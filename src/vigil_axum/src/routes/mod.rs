//! Axum route handlers.
//!
//! Each route owns its error enum and its `IntoResponse` mapping; the actual
//! behavior lives in the `vigil_application` use cases.

pub mod admin;
pub mod login;
pub mod logout;
pub mod register;

pub use admin::{admin_index, bulk_action};
pub use login::login;
pub use logout::logout;
pub use register::register;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vigil_core::{Account, AccountId, AccountName, AccountStatus, Email};

/// Account as rendered to clients. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: AccountName,
    pub email: Email,
    pub status: AccountStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            status: account.status,
            last_login_at: account.last_login_at,
            registered_at: account.registered_at,
        }
    }
}
