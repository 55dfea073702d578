use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AccountError;
use super::email::Email;

/// Opaque account identifier, assigned by the store on insert.
///
/// Never reused after deletion (v4 UUIDs make collisions a non-concern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for AccountId {
    type Err = AccountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AccountError::MalformedId(raw.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountName(String);

impl AccountName {
    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountName {
    type Error = AccountError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of an account.
///
/// Accounts are created `Unverified` and only an administrator's Unblock
/// action ever sets `Active`. `Unverified` accounts may still log in; the
/// status exists so administrators can bulk-delete abandoned registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Unverified,
    Active,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = AccountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "unverified" => Ok(Self::Unverified),
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            other => Err(AccountError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted account record.
///
/// The store is the single source of truth for `status`; session tokens only
/// cache the id and every guarded request re-reads the record.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub email: Email,
    pub password_hash: String,
    pub status: AccountStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

/// Input to [`AccountStore::insert`]; the store assigns id, status
/// (`Unverified`) and `registered_at`.
///
/// [`AccountStore::insert`]: crate::ports::stores::AccountStore::insert
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: AccountName,
    pub email: Email,
    pub password_hash: String,
}

/// Administrator bulk lifecycle action.
///
/// Serialized variant names match the form values posted by the admin page
/// (`Block`, `Unblock`, `Delete`, `DeleteUnverified`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulkAction {
    DeleteUnverified,
    Block,
    Unblock,
    Delete,
}
