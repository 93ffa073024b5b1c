use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use configs::AuthConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

use service::auth::repository::mock::MockCredentialStore;
use service::auth::CredentialStore;

use server::startup::{build_app, build_auth_service};

fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".into(),
        token_issuer: "test-suite".into(),
        token_ttl_secs: 3600,
        kdf_iterations: 1,
    }
}

fn build_app_with(store: Arc<MockCredentialStore>) -> Router {
    let store: Arc<dyn CredentialStore> = store;
    build_app(build_auth_service(store, &auth_config()).expect("valid auth config"))
}

fn app() -> Router {
    build_app_with(Arc::new(MockCredentialStore::default()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn alice() -> Value {
    json!({"id": "alice", "name": "Alice", "password": "secret123", "email": "a@x.com"})
}

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn signup_signin_and_profile_flow() {
    let app = app();

    let (status, body) = send(&app, post_json("/user/signup", alice())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["userId"], "alice");

    let (status, body) = send(&app, post_json("/user/signup", alice())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 409);

    let (status, _) = send(&app, post_json("/user/signin", json!({"id": "alice", "password": "wrong"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, post_json("/user/signin", json!({"id": "alice", "password": "secret123"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["accessToken"].as_str().is_some_and(|t| t.split('.').count() == 3));

    let (status, body) = send(&app, get("/user/profile/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"id": "alice", "name": "Alice", "email": "a@x.com"}));
}

#[tokio::test]
async fn signin_sets_http_only_cookie() {
    let app = app();
    send(&app, post_json("/user/signup", alice())).await;
    let resp = app
        .clone()
        .oneshot(post_json("/user/signin", json!({"id": "alice", "password": "secret123"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let app = app();
    let (status, body) = send(&app, post_json("/user/signup", json!({"id": "bob", "name": "Bob"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, post_json("/user/signin", json!({"id": "bob"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unparseable_body_uses_envelope() {
    let req = Request::builder()
        .method("POST")
        .uri("/user/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let app = app();
    let (status, _) = send(&app, get("/user/profile/nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, post_json("/user/signin", json!({"id": "nobody", "password": "pw"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_failure_is_generic_500() {
    let store = Arc::new(MockCredentialStore::default());
    let app = build_app_with(store.clone());
    store.set_offline(true);
    let (status, body) = send(&app, post_json("/user/signup", alice())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "database error");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = app();
    send(&app, post_json("/user/signup", alice())).await;
    let (_, body) = send(&app, post_json("/user/signin", json!({"id": "alice", "password": "secret123"}))).await;
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, _) = send(&app, get("/auth/me")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad = Request::builder().uri("/auth/me").header(header::AUTHORIZATION, "Token abc").body(Body::empty()).unwrap();
    let (status, _) = send(&app, bad).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}x"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ok = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, ok).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "alice");

    let via_cookie = Request::builder()
        .uri("/auth/me")
        .header(header::COOKIE, format!("auth_token={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, via_cookie).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&app(), get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/user/signup"].is_object());
}

#[test]
fn zero_iterations_is_rejected_at_startup() {
    let cfg = AuthConfig { kdf_iterations: 0, ..auth_config() };
    let store: Arc<dyn CredentialStore> = Arc::new(MockCredentialStore::default());
    assert!(build_auth_service(store, &cfg).is_err());
}
