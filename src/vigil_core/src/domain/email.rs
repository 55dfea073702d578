use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::AccountError;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A validated, normalized email address.
///
/// Parsing lowercases the address so that lookups are case-insensitive;
/// uniqueness in the account store therefore holds regardless of the casing
/// the user typed at registration or login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountError::EmptyEmail);
        }

        let normalized = trimmed.to_lowercase();
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(AccountError::MalformedEmail);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl TryFrom<&str> for Email {
    type Error = AccountError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
