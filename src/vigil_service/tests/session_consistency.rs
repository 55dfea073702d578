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
use vigil_axum::RevalidationPolicy;
use vigil_service::VigilService;

const ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");

fn service() -> Router {
    let sessions = SessionManager::new(
        HashSetRevokedSessionStore::new(),
        SessionConfig {
            cookie_name: "vigil_session".to_string(),
            secret: Secret::from("test-secret".to_owned()),
            remember_ttl_seconds: 7 * 24 * 60 * 60,
            absolute_cap_seconds: 30 * 24 * 60 * 60,
            session_ttl_seconds: 12 * 60 * 60,
        },
    );

    VigilService::new(
        InMemoryAccountStore::new(),
        Argon2CredentialHasher,
        sessions,
        RevalidationPolicy::default(),
        ASSETS_DIR.to_string(),
    )
    .into_router()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
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

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The end-to-end lifecycle: register, conflict on re-register, login,
/// block while the session is live, observe the very next request denied,
/// and a re-login refused.
#[tokio::test]
async fn blocked_account_loses_its_live_session() {
    let app = service();

    // Register Alice: created unverified, never logged in.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Alice", "email": "a@x.com", "password": "pw1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let alice = body_json(response).await;
    assert_eq!(alice["status"], "unverified");
    assert!(alice["last_login_at"].is_null());

    // Same email again: conflict, not a crash.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Alicia", "email": "a@x.com", "password": "pw2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Login records the time and hands out a session cookie.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": "a@x.com", "password": "pw1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let logged_in = body_json(response).await;
    assert!(!logged_in["last_login_at"].is_null());

    // The session works.
    let response = app
        .clone()
        .oneshot(with_cookie(
            Request::get("/admin").body(Body::empty()).unwrap(),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // An administrator blocks Alice while her session is live.
    let response = app
        .clone()
        .oneshot(with_cookie(
            json_request(
                Method::POST,
                "/admin/bulk-action",
                serde_json::json!({ "action": "Block", "target_ids": [alice["id"]] }),
            ),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["applied"], 1);

    // The very next request on the old session is revoked and redirected.
    let response = app
        .clone()
        .oneshot(with_cookie(
            Request::get("/admin").body(Body::empty()).unwrap(),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/account/login"
    );

    // Even the right password no longer gets Alice in.
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
async fn delete_unverified_is_idempotent_over_http() {
    let app = service();

    // An operator account plus one abandoned registration.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Op", "email": "op@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    let operator = body_json(response).await;

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Bob", "email": "b@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": "op@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    // Unblock promotes the operator to active so the sweep spares it.
    let response = app
        .clone()
        .oneshot(with_cookie(
            json_request(
                Method::POST,
                "/admin/bulk-action",
                serde_json::json!({ "action": "Unblock", "target_ids": [operator["id"]] }),
            ),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["applied"], 1);

    // First sweep removes Bob; the second finds nothing.
    for expected in [1, 0] {
        let response = app
            .clone()
            .oneshot(with_cookie(
                json_request(
                    Method::POST,
                    "/admin/bulk-action",
                    serde_json::json!({ "action": "DeleteUnverified" }),
                ),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["applied"], expected);
    }
}

#[tokio::test]
async fn empty_target_bulk_action_is_a_no_op() {
    let app = service();

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Op", "email": "op@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": "op@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(with_cookie(
            json_request(
                Method::POST,
                "/admin/bulk-action",
                serde_json::json!({ "action": "Block", "target_ids": [] }),
            ),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["applied"], 0);
}

#[tokio::test]
async fn login_failures_do_not_reveal_which_part_was_wrong() {
    let app = service();

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/account/register",
            serde_json::json!({ "name": "Alice", "email": "a@x.com", "password": "pw1" }),
        ))
        .await
        .unwrap();

    let unknown_email = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": "nobody@x.com", "password": "pw1" }),
        ))
        .await
        .unwrap();
    let wrong_password = app
        .oneshot(json_request(
            Method::POST,
            "/account/login",
            serde_json::json!({ "email": "a@x.com", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(unknown_email).await["error"],
        body_json(wrong_password).await["error"]
    );
}

#[tokio::test]
async fn static_pages_and_assets_are_served() {
    let app = service();

    for uri in ["/account/login", "/account/register", "/assets/app.css"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    // Unknown paths fall back to the index shell.
    let response = app
        .oneshot(Request::get("/no-such-page").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
