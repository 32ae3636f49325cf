//! Integration tests for current-user and admin user management.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.request("GET", "/user", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], "admin");
    assert_eq!(response.body["user"]["id"], 1);
}

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "alice",
                "email": "alice@test.com",
                "password": "password123",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["username"], "alice");
    assert_eq!(response.body["user"]["role"], "user");
    assert!(response.body["user"].get("password").is_none());

    let list = app.request("GET", "/users", None, Some(&token)).await;
    let names: Vec<&str> = list.body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "alice"]);
}

#[tokio::test]
async fn test_create_duplicate_user() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let body = serde_json::json!({
        "username": "bob",
        "email": "bob@test.com",
        "password": "password123",
    });

    let first = app
        .request("POST", "/users", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.request("POST", "/users", Some(body), Some(&token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let bad_email = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "carol",
                "email": "not-an-email",
                "password": "password123",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let short_password = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "carol",
                "email": "carol@test.com",
                "password": "123",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let bad_role = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "carol",
                "email": "carol@test.com",
                "password": "password123",
                "role": "superuser",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let user = app.create_user_and_login(&admin, "dave").await;

    let list = app.request("GET", "/users", None, Some(&user)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let create = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "eve",
                "email": "eve@test.com",
                "password": "password123",
            })),
            Some(&user),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", "/users/admin", None, Some(&user)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let me = app.request("GET", "/user", None, Some(&user)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["role"], "user");
}

#[tokio::test]
async fn test_delete_bootstrap_admin_is_rejected() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.request("DELETE", "/users/admin", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let list = app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(list.body["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_user() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.request("DELETE", "/users/ghost", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_user_sessions_are_revoked() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let user = app.create_user_and_login(&admin, "frank").await;

    let delete = app.request("DELETE", "/users/frank", None, Some(&admin)).await;
    assert_eq!(delete.status, StatusCode::OK);
    assert!(delete.body.get("message").is_some());

    let reuse = app.request("GET", "/user", None, Some(&user)).await;
    assert_eq!(reuse.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_is_forbidden_before_body_checks() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let user = app.create_user_and_login(&admin, "judy").await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({ "username": "" })),
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(!response.error().contains("missing field"));
}

#[tokio::test]
async fn test_empty_role_defaults_to_user() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "kate",
                "email": "kate@test.com",
                "password": "password123",
                "role": "",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["user"]["role"], "user");

    let admin_role = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "username": "leo",
                "email": "leo@test.com",
                "password": "password123",
                "role": "admin",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(admin_role.status, StatusCode::CREATED);
    assert_eq!(admin_role.body["user"]["role"], "admin");
}
