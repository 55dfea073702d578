use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use thiserror::Error;
use vigil_application::LogoutUseCase;
use vigil_core::{AccountStore, CredentialHasher, RevokedSessionStore};

use crate::state::AppState;

/// `POST /account/logout` — revoke the presented session and clear its
/// cookie.
///
/// Revocation happens server-side: clearing the cookie alone would leave the
/// token usable by anyone who had captured it.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<S, R, H>(
    State(state): State<AppState<S, R, H>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, LogoutError>
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let token = state
        .sessions
        .extract_token(&jar)
        .map_err(|_| LogoutError::MissingToken)?
        .to_string();

    LogoutUseCase::new(state.sessions.revocations().clone())
        .execute(token)
        .await
        .map_err(|e| LogoutError::Internal(e.to_string()))?;

    Ok((
        jar.add(state.sessions.removal_cookie()),
        Json(serde_json::json!({ "message": "logged out" })),
    ))
}

/// Errors that can occur during logout
#[derive(Debug, Error)]
pub enum LogoutError {
    #[error("missing session token")]
    MissingToken,

    #[error("logout failed: {0}")]
    Internal(String),
}

impl IntoResponse for LogoutError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            LogoutError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "missing session token".to_string())
            }
            LogoutError::Internal(detail) => {
                tracing::error!("logout failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
