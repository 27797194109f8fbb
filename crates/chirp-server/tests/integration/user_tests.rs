use serde_json::json;

use axum::http::StatusCode;
use chirp_core::password::verify_password;

use super::common::{post_json, setup_test_app};

fn registration(username: &str, email: &str) -> serde_json::Value {
    json!({ "username": username, "email": email, "password": "hunter2" })
}

#[tokio::test]
async fn test_register_user() {
    let app = setup_test_app();

    let (status, body) = app
        .send(post_json("/", registration("alice", "alice@example.com")))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let user = &body["user"];
    assert_eq!(user["id"], 1);
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@example.com");
    assert!(user["createdAt"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("hashedPassword").is_none());
    assert!(!body.to_string().contains("hunter2"));

    let hash = app.store.hashed_password("alice").unwrap();
    assert_ne!(hash, "hunter2");
    assert!(verify_password("hunter2", &hash).unwrap());
}

#[tokio::test]
async fn test_register_reports_every_missing_field() {
    let app = setup_test_app();

    let (status, body) = app.send(post_json("/", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad request");
    assert_eq!(
        body["errors"],
        json!([
            "Please provide a username",
            "Please provide a valid email.",
            "Please provide a password."
        ])
    );
    assert!(app.store.hashed_password("").is_none());
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = setup_test_app();

    let (status, body) = app
        .send(post_json("/", registration("bob", "not-an-email")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Please provide a valid email."]));
    assert!(app.store.hashed_password("bob").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = setup_test_app();

    let (status, _) = app
        .send(post_json("/", registration("alice", "alice@example.com")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(post_json("/", registration("alice", "other@example.com")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["title"], "Conflict");
    assert_eq!(body["errors"], json!(["Username is already taken"]));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = setup_test_app();

    app.send(post_json("/", registration("alice", "alice@example.com")))
        .await;

    let (status, body) = app
        .send(post_json("/", registration("bob", "alice@example.com")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"], json!(["Email is already registered"]));
    assert!(app.store.hashed_password("bob").is_none());
}

#[tokio::test]
async fn test_register_username_length() {
    let app = setup_test_app();

    let username = "a".repeat(51);
    let (status, body) = app
        .send(post_json("/", registration(&username, "long@example.com")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], username);

    let (status, body) = app
        .send(post_json("/", registration(&"b".repeat(256), "longer@example.com")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!(["Your username can't be longer than 255 characters"])
    );
}

#[tokio::test]
async fn test_register_rejects_nul_username() {
    let app = setup_test_app();

    let (status, body) = app
        .send(post_json("/", registration("al\0ice", "alice@example.com")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!(["Your username can't contain null characters"])
    );
    assert!(app.store.hashed_password("al\0ice").is_none());
}
