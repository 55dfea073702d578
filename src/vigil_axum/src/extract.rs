use axum::{Json, extract::FromRequestParts, http::StatusCode, http::request::Parts};
use vigil_core::Account;

/// The freshly revalidated account behind the request's session.
///
/// Inserted by the revalidation middleware after it has re-read the account
/// from the store, so handlers extracting this see the current record, never
/// a stale snapshot from token-issuance time. Extraction fails with 401 on
/// requests that carried no valid session.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentAccount>().cloned().ok_or((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "authentication required" })),
        ))
    }
}
