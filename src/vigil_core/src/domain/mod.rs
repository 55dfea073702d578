pub mod account;
pub mod email;
pub mod password;

use thiserror::Error;

/// Validation failures for user-supplied account fields.
///
/// These are user-correctable and are rendered back to the caller as
/// field-level messages at the HTTP boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email is not a valid address")]
    MalformedEmail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("unknown account status `{0}`")]
    UnknownStatus(String),
    #[error("malformed account id `{0}`")]
    MalformedId(String),
}
