use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use vigil_adapters::{SessionClaims, SessionError, SessionManager};
use vigil_core::{AccountStore, AccountStatus, CredentialHasher, RevokedSessionStore};

use crate::extract::CurrentAccount;
use crate::state::AppState;

/// Re-checks the session's backing account on every guarded request.
///
/// The session token is trusted only for the account id it carries (it is
/// signed); the account's current status is read fresh from the store each
/// time. There is no status cache: a block or deletion committed by an
/// administrator is observed on the very next request, not after some TTL.
///
/// Decision table:
/// - exempt path → admit, untouched.
/// - no token, or a token that no longer validates → admit as anonymous;
///   whether the target resource needs a session is the handler's call.
/// - account missing or blocked → revoke the token, clear the cookie,
///   303 to the login page.
/// - otherwise → admit with [`CurrentAccount`] attached, and slide the
///   expiry of "remember me" sessions.
#[tracing::instrument(name = "Revalidate session", skip_all, fields(path = %request.uri().path()))]
pub async fn revalidate<S, R, H>(
    State(state): State<AppState<S, R, H>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response
where
    S: AccountStore + Clone + 'static,
    R: RevokedSessionStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    if state.policy.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let token = match state.sessions.extract_token(&jar) {
        Ok(token) => token.to_string(),
        Err(_) => return next.run(request).await,
    };

    let claims = match state.sessions.validate(&token).await {
        Ok(claims) => claims,
        Err(SessionError::Unexpected(e)) => return storage_failure(&e),
        // Expired, revoked or tampered tokens all mean "no session here".
        Err(_) => return next.run(request).await,
    };

    let Ok(account_id) = claims.account_id() else {
        return next.run(request).await;
    };

    let account = match state.accounts.find_by_id(account_id).await {
        Ok(account) => account,
        Err(e) => return storage_failure(&e.to_string()),
    };

    match account {
        Some(account) if account.status != AccountStatus::Blocked => {
            request.extensions_mut().insert(CurrentAccount(account));
            let mut response = next.run(request).await;
            attach_renewal(&state.sessions, &claims, &mut response);
            response
        }
        _ => {
            // Blocked or deleted while the session was live: the session dies
            // now, not when the token would have expired.
            if let Err(e) = state.sessions.revoke(token).await {
                return storage_failure(&e.to_string());
            }
            let jar = jar.add(state.sessions.removal_cookie());
            (jar, Redirect::to(state.policy.login_path())).into_response()
        }
    }
}

/// Append the slid-expiry cookie for "remember me" sessions.
///
/// Skipped when the handler already set the session cookie itself: logout's
/// removal cookie must not be followed by a fresh token for the same name.
fn attach_renewal<R: RevokedSessionStore>(
    sessions: &SessionManager<R>,
    claims: &SessionClaims,
    response: &mut Response,
) {
    let prefix = format!("{}=", sessions.cookie_name());
    let already_set = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|v| v.trim_start().starts_with(&prefix)));
    if already_set {
        return;
    }

    match sessions.renewal_cookie(claims) {
        Ok(Some(cookie)) => {
            if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("session renewal failed: {e}"),
    }
}

fn storage_failure(detail: &str) -> Response {
    tracing::error!("revalidation aborted on storage failure: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal server error" })),
    )
        .into_response()
}
