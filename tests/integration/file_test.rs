//! Integration tests for file operations.

use axum::http::{StatusCode, header};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_files_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/files", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_empty_root() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.request("GET", "/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["currentPath"], "/");
    assert_eq!(response.body["files"].as_array().unwrap().len(), 0);
    assert_eq!(response.body["totalSize"], 0);
}

#[tokio::test]
async fn test_upload_list_download() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let upload = app.upload(&token, "/", "hello.txt", b"hello nas").await;
    assert_eq!(upload.status, StatusCode::OK, "{:?}", upload.body);
    assert_eq!(upload.body["filename"], "hello.txt");
    assert_eq!(upload.body["size"], 9);
    assert_eq!(upload.body["path"], "/hello.txt");
    assert!(app.storage.path().join("hello.txt").is_file());

    let folder = app
        .request(
            "POST",
            "/files/folder",
            Some(serde_json::json!({ "path": "/", "name": "docs" })),
            Some(&token),
        )
        .await;
    assert_eq!(folder.status, StatusCode::OK);
    assert_eq!(folder.body["path"], "/docs");

    let list = app.request("GET", "/files?path=/", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let files = list.body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "docs");
    assert_eq!(files[0]["isDir"], true);
    assert_eq!(files[1]["name"], "hello.txt");
    assert_eq!(files[1]["size"], 9);
    assert!(files[1].get("mimeType").is_none());
    assert_eq!(list.body["totalSize"], 9);

    let (status, headers, body) = app.download(&token, "/hello.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"hello nas");
    let disposition = headers
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("hello.txt"));
}

#[tokio::test]
async fn test_upload_into_subdirectory() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let upload = app.upload(&token, "/media/music", "song.mp3", b"la la").await;

    assert_eq!(upload.status, StatusCode::OK, "{:?}", upload.body);
    assert_eq!(upload.body["path"], "/media/music/song.mp3");
    assert!(app.storage.path().join("media/music/song.mp3").is_file());
}

#[tokio::test]
async fn test_upload_rejects_traversal_filename() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.upload(&token, "/", "../escape.txt", b"nope").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(!app.storage.path().join("../escape.txt").exists());
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let list = app
        .request("GET", "/files?path=/../../etc", None, Some(&token))
        .await;
    assert_eq!(list.status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app.download(&token, "../../etc/passwd").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let delete = app
        .request("DELETE", "/files?path=/a/../..", None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::BAD_REQUEST);

    let folder = app
        .request(
            "POST",
            "/files/folder",
            Some(serde_json::json!({ "path": "/", "name": ".." })),
            Some(&token),
        )
        .await;
    assert_eq!(folder.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_errors() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let missing = app.request("GET", "/files/download", None, Some(&token)).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app.download(&token, "/nope.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_missing_directory() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app
        .request("GET", "/files?path=/missing", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file_and_root() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    app.upload(&token, "/", "gone.txt", b"bye").await;

    let delete = app
        .request("DELETE", "/files?path=/gone.txt", None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::OK);
    assert!(!app.storage.path().join("gone.txt").exists());

    let root = app
        .request("DELETE", "/files?path=/", None, Some(&token))
        .await;
    assert_eq!(root.status, StatusCode::BAD_REQUEST);
    assert!(app.storage.path().exists());

    let no_path = app.request("DELETE", "/files", None, Some(&token)).await;
    assert_eq!(no_path.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_regular_user_can_use_files() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let user = app.create_user_and_login(&admin, "grace").await;

    let upload = app.upload(&user, "/", "notes.txt", b"mine").await;
    assert_eq!(upload.status, StatusCode::OK);

    let list = app.request("GET", "/files", None, Some(&user)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["files"].as_array().unwrap().len(), 1);
}
