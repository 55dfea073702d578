use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;
use vigil_application::RegisterUseCase;
use vigil_core::{
    AccountError, AccountName, AccountStore, CredentialHasher, Email, Password,
    RevokedSessionStore,
};

use crate::routes::AccountView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
}

/// `POST /account/register` — create a new, unverified account.
#[tracing::instrument(name = "Register", skip(state, request))]
pub async fn register<S, R, H>(
    State(state): State<AppState<S, R, H>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, RegisterError>
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let name = AccountName::parse(&request.name)?;
    let email = Email::parse(&request.email)?;
    let password = Password::parse(request.password)?;

    let account = RegisterUseCase::new(state.accounts.clone(), state.hasher.clone())
        .execute(name, email, password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountView::from(&account))))
}

/// Errors that can occur during registration
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(#[from] AccountError),

    #[error("email already registered")]
    EmailTaken,

    #[error("registration failed: {0}")]
    Internal(String),
}

impl From<vigil_application::RegisterError> for RegisterError {
    fn from(err: vigil_application::RegisterError) -> Self {
        match err {
            vigil_application::RegisterError::EmailTaken => Self::EmailTaken,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            RegisterError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            RegisterError::EmailTaken => {
                (StatusCode::CONFLICT, "email already registered".to_string())
            }
            RegisterError::Internal(detail) => {
                tracing::error!("registration failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
