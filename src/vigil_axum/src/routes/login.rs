use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;
use vigil_application::LoginUseCase;
use vigil_core::{
    AccountError, AccountStore, CredentialHasher, Email, Password, RevokedSessionStore,
};

use crate::routes::AccountView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
    #[serde(default)]
    pub remember: bool,
}

/// `POST /account/login` — check credentials and issue a session cookie.
#[tracing::instrument(name = "Login", skip(state, jar, request))]
pub async fn login<S, R, H>(
    State(state): State<AppState<S, R, H>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, LoginError>
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let email = Email::parse(&request.email)?;
    let password = Password::parse(request.password)?;

    let account = LoginUseCase::new(state.accounts.clone(), state.hasher.clone())
        .execute(&email, password)
        .await?;

    let cookie = state
        .sessions
        .issue(account.id, request.remember)
        .map_err(|e| LoginError::Internal(e.to_string()))?;

    Ok((jar.add(cookie), Json(AccountView::from(&account))))
}

/// Errors that can occur during login
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{0}")]
    Validation(#[from] AccountError),

    /// One message for unknown email and wrong password alike.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account is blocked")]
    Blocked,

    #[error("login failed: {0}")]
    Internal(String),
}

impl From<vigil_application::LoginError> for LoginError {
    fn from(err: vigil_application::LoginError) -> Self {
        match err {
            vigil_application::LoginError::InvalidCredentials => Self::InvalidCredentials,
            vigil_application::LoginError::Blocked => Self::Blocked,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            LoginError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            LoginError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid email or password".to_string(),
            ),
            LoginError::Blocked => (StatusCode::FORBIDDEN, "account is blocked".to_string()),
            LoginError::Internal(detail) => {
                tracing::error!("login failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
