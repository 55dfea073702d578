use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use thiserror::Error;
use vigil_application::{BulkActionUseCase, ListAccountsUseCase};
use vigil_core::{
    AccountId, AccountStore, AccountStoreError, BulkAction, CredentialHasher,
    RevokedSessionStore,
};

use crate::extract::CurrentAccount;
use crate::routes::AccountView;
use crate::state::AppState;

/// `GET /admin` — every account, most recently logged in first,
/// never-logged-in accounts last. Requires a session.
#[tracing::instrument(name = "Admin index", skip_all)]
pub async fn admin_index<S, R, H>(
    _admin: CurrentAccount,
    State(state): State<AppState<S, R, H>>,
) -> Result<Json<Vec<AccountView>>, AdminError>
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let accounts = ListAccountsUseCase::new(state.accounts.clone())
        .execute()
        .await?;

    Ok(Json(accounts.iter().map(AccountView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct BulkActionRequest {
    pub action: BulkAction,
    #[serde(default)]
    pub target_ids: Vec<AccountId>,
}

/// `POST /admin/bulk-action` — apply a lifecycle transition to a set of
/// accounts. Responds with how many records were actually touched.
#[tracing::instrument(name = "Admin bulk action", skip(_admin, state))]
pub async fn bulk_action<S, R, H>(
    _admin: CurrentAccount,
    State(state): State<AppState<S, R, H>>,
    Json(request): Json<BulkActionRequest>,
) -> Result<Json<serde_json::Value>, AdminError>
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let applied = BulkActionUseCase::new(state.accounts.clone())
        .execute(request.action, &request.target_ids)
        .await?;

    Ok(Json(serde_json::json!({ "applied": applied })))
}

/// Errors that can occur on the admin surface
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),

    /// A bulk action faulted mid-batch. The applied count is reported back
    /// so the administrator knows the batch may be partial.
    #[error("bulk action failed after {applied} updates: {detail}")]
    PartialBatch { applied: u64, detail: String },
}

impl From<vigil_application::BulkActionError> for AdminError {
    fn from(err: vigil_application::BulkActionError) -> Self {
        match err {
            vigil_application::BulkActionError::Store { applied, source } => Self::PartialBatch {
                applied,
                detail: source.to_string(),
            },
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminError::Store(e) => {
                tracing::error!("admin listing failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
            AdminError::PartialBatch { applied, detail } => {
                tracing::error!("bulk action failed after {applied} updates: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": "bulk action failed",
                        "applied": applied,
                    })),
                )
                    .into_response()
            }
        }
    }
}
