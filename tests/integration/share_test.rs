//! Integration tests for the share registry.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_and_list_shares() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let create = app
        .request(
            "POST",
            "/samba/shares",
            Some(serde_json::json!({
                "name": "media",
                "path": "/media",
                "comment": "Movies and music",
                "readOnly": true,
                "users": ["admin"],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(create.status, StatusCode::CREATED, "{:?}", create.body);
    assert_eq!(create.body["share"]["name"], "media");
    assert_eq!(create.body["share"]["path"], "/media");
    assert_eq!(create.body["share"]["readOnly"], true);
    assert_eq!(create.body["share"]["guestAccess"], false);
    assert!(app.storage.path().join("media").is_dir());

    app.request(
        "POST",
        "/samba/shares",
        Some(serde_json::json!({ "name": "backup", "path": "/backup" })),
        Some(&token),
    )
    .await;

    let list = app.request("GET", "/samba/shares", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let names: Vec<&str> = list.body["shares"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["backup", "media"]);
}

#[tokio::test]
async fn test_duplicate_share() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let body = serde_json::json!({ "name": "docs", "path": "/docs" });

    let first = app
        .request("POST", "/samba/shares", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.request("POST", "/samba/shares", Some(body), Some(&token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_share_requests() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    for body in [
        serde_json::json!({ "name": "my share", "path": "/x" }),
        serde_json::json!({ "name": "..", "path": "/x" }),
        serde_json::json!({ "name": "ok", "path": "/../outside" }),
        serde_json::json!({ "name": "", "path": "/x" }),
    ] {
        let response = app
            .request("POST", "/samba/shares", Some(body.clone()), Some(&token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "accepted {body}"
        );
    }
}

#[tokio::test]
async fn test_share_management_requires_admin() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let user = app.create_user_and_login(&admin, "henry").await;

    let create = app
        .request(
            "POST",
            "/samba/shares",
            Some(serde_json::json!({ "name": "private", "path": "/private" })),
            Some(&user),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let list = app.request("GET", "/samba/shares", None, Some(&user)).await;
    assert_eq!(list.status, StatusCode::OK);

    let delete = app.request("DELETE", "/samba/shares/private", None, Some(&user)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_share() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    app.request(
        "POST",
        "/samba/shares",
        Some(serde_json::json!({ "name": "temp", "path": "/temp" })),
        Some(&token),
    )
    .await;

    let delete = app.request("DELETE", "/samba/shares/temp", None, Some(&token)).await;
    assert_eq!(delete.status, StatusCode::OK);
    assert!(app.storage.path().join("temp").is_dir());

    let again = app.request("DELETE", "/samba/shares/temp", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shares_are_served_under_samba() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let samba = app.request("GET", "/samba/shares", None, Some(&token)).await;
    assert_eq!(samba.status, StatusCode::OK);
    assert_eq!(samba.body["shares"].as_array().unwrap().len(), 0);

    let bare = app.request("GET", "/shares", None, Some(&token)).await;
    assert_eq!(bare.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_admin_malformed_share_is_forbidden() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let user = app.create_user_and_login(&admin, "ivan").await;

    let response = app
        .request(
            "POST",
            "/samba/shares",
            Some(serde_json::json!({ "name": "" })),
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
