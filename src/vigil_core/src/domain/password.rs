use secrecy::{ExposeSecret, Secret};

use super::AccountError;

/// A raw password supplied by the user.
///
/// Only ever held in memory behind [`Secret`]; the account store persists an
/// argon2 hash, never this value. Validation requires the password to be
/// non-empty after trimming, but the stored value is kept exactly as typed.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, AccountError> {
        if raw.expose_secret().trim().is_empty() {
            return Err(AccountError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = AccountError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}
