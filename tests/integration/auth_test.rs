//! Integration tests for authentication flow.

use axum::http::StatusCode;

use crate::helpers::{ADMIN_PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "admin",
                "password": ADMIN_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap();
    assert_eq!(token.len(), 43);
    assert!(response.body.get("expiresAt").is_some());
    assert_eq!(response.body["user"]["username"], "admin");
    assert_eq!(response.body["user"]["role"], "admin");
    assert!(response.body["user"].get("lastLogin").is_some());
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "username": "admin", "password": "nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "username": "ghost", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_login_username_is_case_sensitive() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "username": "Admin", "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::new().await;

    let missing_field = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "username": "admin" })),
            None,
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert!(!missing_field.error().is_empty());

    let empty_fields = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "username": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(empty_fields.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/user", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(!response.error().is_empty());
}

#[tokio::test]
async fn test_protected_route_with_unknown_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/user", None, Some("not-a-real-token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_prefix_is_optional() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let bare = app.request_with_authorization("GET", "/user", &token).await;
    assert_eq!(bare.status, StatusCode::OK);
    assert_eq!(bare.body["user"]["username"], "admin");

    let lowercase = app
        .request_with_authorization("GET", "/user", &format!("bearer {token}"))
        .await;
    assert_eq!(lowercase.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_then_list_users() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.request("GET", "/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let users = response.body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "admin");
}

#[tokio::test]
async fn test_logout_then_reuse_is_rejected() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let logout = app.request("POST", "/auth/logout", None, Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(logout.body.get("message").is_some());

    let reuse = app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(reuse.status, StatusCode::UNAUTHORIZED);

    let again = app.request("POST", "/auth/logout", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_token() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "No token provided");
}

#[tokio::test]
async fn test_concurrent_logins_get_independent_sessions() {
    let app = TestApp::new().await;

    let first = app.login_admin().await;
    let second = app.login_admin().await;
    assert_ne!(first, second);

    let logout = app.request("POST", "/auth/logout", None, Some(&first)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let still_valid = app.request("GET", "/user", None, Some(&second)).await;
    assert_eq!(still_valid.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "nashub");
    assert_eq!(response.body["storage"], "available");
}

#[tokio::test]
async fn test_health_reports_missing_storage() {
    let app = TestApp::new().await;
    std::fs::remove_dir_all(app.storage.path()).unwrap();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "degraded");
    assert_eq!(response.body["storage"], "unavailable");
}

#[tokio::test]
async fn test_logout_with_bare_prefix() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app
        .request_with_authorization("POST", "/auth/logout", "Bearer ")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let still_valid = app.request("GET", "/user", None, Some(&token)).await;
    assert_eq!(still_valid.status, StatusCode::OK);
}

#[tokio::test]
async fn test_padded_token_is_not_accepted() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let padded = app
        .request_with_authorization("GET", "/user", &format!("Bearer {token} "))
        .await;
    assert_eq!(padded.status, StatusCode::UNAUTHORIZED);
}
