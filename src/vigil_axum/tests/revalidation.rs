use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use secrecy::Secret;
use tower::ServiceExt;
use vigil_adapters::{
    Argon2CredentialHasher, HashSetRevokedSessionStore, InMemoryAccountStore, SessionConfig,
    SessionManager,
};
use vigil_axum::{AppState, RevalidationPolicy, router};
use vigil_core::{AccountStatus, AccountStore, Email};

const COOKIE_NAME: &str = "vigil_session";

fn app() -> (Router, InMemoryAccountStore) {
    let accounts = InMemoryAccountStore::new();
    let sessions = SessionManager::new(
        HashSetRevokedSessionStore::new(),
        SessionConfig {
            cookie_name: COOKIE_NAME.to_string(),
            secret: Secret::from("test-secret".to_owned()),
            remember_ttl_seconds: 7 * 24 * 60 * 60,
            absolute_cap_seconds: 30 * 24 * 60 * 60,
            session_ttl_seconds: 12 * 60 * 60,
        },
    );
    let state = AppState {
        accounts: accounts.clone(),
        hasher: Argon2CredentialHasher,
        sessions,
        policy: RevalidationPolicy::default(),
    };
    (router(state), accounts)
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn register_and_login(app: &Router, email: &str, remember: bool) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Alice", "email": email, "password": "pw1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": email, "password": "pw1", "remember": remember }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

#[tokio::test]
async fn anonymous_requests_are_admitted_not_redirected() {
    let (app, _) = app();

    let response = app
        .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // The middleware admits; the handler's own authorization says 401.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_treated_as_no_session() {
    let (app, _) = app();

    let response = app
        .oneshot(get_with_cookie(
            "/admin",
            &format!("{COOKIE_NAME}=not-a-jwt"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_session_reaches_the_admin_listing() {
    let (app, _) = app();
    let cookie = register_and_login(&app, "a@x.com", false).await;

    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn blocked_account_is_denied_on_the_very_next_request() {
    let (app, accounts) = app();
    let cookie = register_and_login(&app, "a@x.com", false).await;

    let alice = accounts
        .find_by_email(&Email::parse("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    accounts
        .set_status(&[alice.id], AccountStatus::Blocked)
        .await
        .unwrap();

    // First request after the block: revoked and redirected to login.
    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/account/login"
    );
    // The cookie is cleared alongside the redirect.
    let removal = session_cookie(&response);
    assert_eq!(removal, format!("{COOKIE_NAME}="));

    // The token itself is now revoked: replaying it is anonymous, not 303.
    let response = app
        .clone()
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // And a fresh login with correct credentials reports the block.
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": "a@x.com", "password": "pw1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleted_account_session_is_revoked() {
    let (app, accounts) = app();
    let cookie = register_and_login(&app, "a@x.com", false).await;

    let alice = accounts
        .find_by_email(&Email::parse("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    accounts.delete(&[alice.id]).await.unwrap();

    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/account/login"
    );
}

#[tokio::test]
async fn exempt_paths_never_redirect_even_when_blocked() {
    let (app, accounts) = app();
    let cookie = register_and_login(&app, "a@x.com", false).await;

    let alice = accounts
        .find_by_email(&Email::parse("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    accounts
        .set_status(&[alice.id], AccountStatus::Blocked)
        .await
        .unwrap();

    // Hitting the login endpoint with the dead session must not bounce back
    // to login — that would loop forever.
    let mut request = json_request(
        Method::POST,
        "/account/login",
        serde_json::json!({ "email": "a@x.com", "password": "pw1" }),
    );
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_ne!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn remember_sessions_are_renewed_on_use() {
    let (app, _) = app();
    let cookie = register_and_login(&app, "a@x.com", true).await;

    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let renewed = session_cookie(&response);
    assert!(renewed.starts_with(&format!("{COOKIE_NAME}=")));
    assert_ne!(renewed, format!("{COOKIE_NAME}="));
}

#[tokio::test]
async fn transient_sessions_are_not_renewed() {
    let (app, _) = app();
    let cookie = register_and_login(&app, "a@x.com", false).await;

    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn logout_revokes_and_is_not_undone_by_renewal() {
    let (app, _) = app();
    let cookie = register_and_login(&app, "a@x.com", true).await;

    let mut request = Request::builder()
        .method(Method::POST)
        .uri("/account/logout")
        .body(Body::empty())
        .unwrap();
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Exactly one session Set-Cookie: the removal. A renewal here would hand
    // the client a fresh, unrevoked token right after logging out.
    let session_cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter(|v| v.to_str().unwrap().starts_with(COOKIE_NAME))
        .collect();
    assert_eq!(session_cookies.len(), 1);
    assert!(
        session_cookies[0]
            .to_str()
            .unwrap()
            .starts_with(&format!("{COOKIE_NAME}=;"))
    );

    // The revoked token no longer authenticates anything.
    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
