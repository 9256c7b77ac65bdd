//! Integration tests for the account routes.
//!
//! These drive the real router end to end against the in-memory credential
//! store: form-encoded requests in, status codes and bodies out.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use konto::account::{repo::MemoryCredentialStore, AccountService};
use konto::konto::router;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let service = AccountService::new(Arc::new(MemoryCredentialStore::new())).expect("service");
    router(service)
}

fn form_request(path: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.into()))
        .expect("request")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

#[tokio::test]
async fn create_account_then_login_succeeds() {
    let app = app();

    let (status, body) = send(
        &app,
        form_request("/createaccount", "username=ferris&password=hunter2"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "Account created");

    let (status, body) = send(
        &app,
        form_request("/login", "username=ferris&password=hunter2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Login successful");
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = app();

    let (status, _) = send(
        &app,
        form_request("/createaccount", "username=ferris&password=first"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        form_request("/createaccount", "username=ferris&password=second"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "Username already exists");
}

#[tokio::test]
async fn missing_or_empty_fields_rejected() {
    let app = app();

    // No password field at all: the form does not deserialize.
    let (status, _) = send(&app, form_request("/createaccount", "username=ferris")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Fields present but empty.
    let (status, body) = send(
        &app,
        form_request("/createaccount", "username=&password=hunter2"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Username and password are required");

    let (status, body) = send(
        &app,
        form_request("/createaccount", "username=ferris&password="),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Username and password are required");
}

#[tokio::test]
async fn login_unknown_user_and_wrong_password_are_indistinguishable() {
    let app = app();

    let (status, _) = send(
        &app,
        form_request("/createaccount", "username=ferris&password=right"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (wrong_status, wrong_body) = send(
        &app,
        form_request("/login", "username=ferris&password=wrong"),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        form_request("/login", "username=ghost&password=right"),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn login_empty_fields_are_unauthorized() {
    let app = app();

    let (status, body) = send(&app, form_request("/login", "username=&password=x")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Invalid username or password");

    let (status, body) = send(&app, form_request("/login", "username=u&password=")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Invalid username or password");
}

#[tokio::test]
async fn responses_never_carry_the_password_hash() {
    let app = app();

    let (_, create_body) = send(
        &app,
        form_request("/createaccount", "username=ferris&password=hunter2"),
    )
    .await;
    let (_, login_body) = send(
        &app,
        form_request("/login", "username=ferris&password=hunter2"),
    )
    .await;

    assert!(!create_body.contains("argon2"));
    assert!(!create_body.contains("hunter2"));
    assert!(!login_body.contains("argon2"));
    assert!(!login_body.contains("hunter2"));
}

#[tokio::test]
async fn health_reports_name_and_version() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let x_app = response
        .headers()
        .get("X-App")
        .and_then(|value| value.to_str().ok())
        .expect("X-App header");
    assert!(x_app.starts_with("konto:"));

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body.get("name").and_then(|v| v.as_str()), Some("konto"));
}
