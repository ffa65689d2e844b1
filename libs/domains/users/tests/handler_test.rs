//! Handler tests for the auth domain
//!
//! These tests drive the auth router directly with `oneshot` requests
//! against the in-memory repository, verifying status codes, the
//! response envelope, and the admin-token guard.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app(admin_token: Option<&str>) -> Router {
    let service = UserService::new(InMemoryUserRepository::new());
    handlers::router(service, admin_token.map(String::from))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn post_json_with_token(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-admin-token", token)
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_then_login_roundtrip() {
    let app = app(None);

    let response = app
        .clone()
        .oneshot(post_json(
            "/user",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("password_hash").is_none());

    let response = app
        .oneshot(post_json(
            "/auth",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_duplicate_registration_is_409() {
    let app = app(None);

    let response = app
        .clone()
        .oneshot(post_json(
            "/user",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/user",
            json!({ "email": "ada@example.com", "password": "different horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);

    // The conflict must not have touched the first record: its
    // original credentials still authenticate.
    let response = app
        .oneshot(post_json(
            "/auth",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_failed_logins_share_one_error_body() {
    let app = app(None);

    app.clone()
        .oneshot(post_json(
            "/user",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/auth",
            json!({ "email": "ada@example.com", "password": "wrong horse" }),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(post_json(
            "/auth",
            json!({ "email": "ghost@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Identical messages so callers cannot probe which emails exist
    let body_a = json_body(wrong_password.into_body()).await;
    let body_b = json_body(unknown_email.into_body()).await;
    assert_eq!(body_a["error"]["message"], body_b["error"]["message"]);
}

#[tokio::test]
async fn test_short_password_is_400() {
    let app = app(None);

    let response = app
        .oneshot(post_json(
            "/user",
            json!({ "email": "ada@example.com", "password": "short" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_email_is_400() {
    let app = app(None);

    let response = app
        .oneshot(post_json(
            "/user",
            json!({ "email": "not-an-email", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_registration_with_valid_token() {
    let app = app(Some("sesame"));

    let response = app
        .oneshot(post_json_with_token(
            "/admin",
            "sesame",
            json!({ "email": "root@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_admin_registration_rejects_bad_token() {
    let app = app(Some("sesame"));

    let response = app
        .clone()
        .oneshot(post_json_with_token(
            "/admin",
            "not-sesame",
            json!({ "email": "root@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing header entirely
    let response = app
        .oneshot(post_json(
            "/admin",
            json!({ "email": "root@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_registration_refused_when_unconfigured() {
    let app = app(None);

    let response = app
        .oneshot(post_json_with_token(
            "/admin",
            "anything",
            json!({ "email": "root@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
