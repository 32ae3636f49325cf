//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use nashub_core::config::AppConfig;

/// Password of the bootstrap `admin` account under the default config.
pub const ADMIN_PASSWORD: &str = "admin123";

const MULTIPART_BOUNDARY: &str = "nashub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Storage root, removed when the app is dropped
    pub storage: TempDir,
}

impl TestApp {
    /// Create a new test application with a fresh storage root
    pub async fn new() -> Self {
        let storage = TempDir::new().expect("Failed to create storage root");

        let mut config = AppConfig::default();
        config.storage.root = storage.path().to_string_lossy().into_owned();
        config.session.cleanup_interval_minutes = 0;

        let state = nashub_api::build_state(config.clone())
            .await
            .expect("Failed to build application state");
        let router = nashub_api::build_router(state);

        Self {
            router,
            config,
            storage,
        }
    }

    /// Prefix a route with the configured API prefix
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.server.api_prefix, path)
    }

    /// Login and return the session token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self.request("POST", "/auth/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Login as the bootstrap admin
    pub async fn login_admin(&self) -> String {
        self.login("admin", ADMIN_PASSWORD).await
    }

    /// Create a user through the admin API and log in as them
    pub async fn create_user_and_login(&self, admin_token: &str, username: &str) -> String {
        let response = self
            .request(
                "POST",
                "/users",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@test.com"),
                    "password": "password123",
                })),
                Some(admin_token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create user failed: {:?}",
            response.body
        );

        self.login(username, "password123").await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(self.url(path))
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        authorization: &str,
    ) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(self.url(path))
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `content` as `filename` into `dir` via multipart
    pub async fn upload(
        &self,
        token: &str,
        dir: &str,
        filename: &str,
        content: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(self.url(&format!("/files/upload?path={dir}")))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Download a file and return the status, headers and raw bytes
    pub async fn download(
        &self,
        token: &str,
        path: &str,
    ) -> (StatusCode, axum::http::HeaderMap, Bytes) {
        let req = Request::builder()
            .method("GET")
            .uri(self.url(&format!("/files/download?path={path}")))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, headers, bytes)
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of a failure body
    pub fn error(&self) -> &str {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }
}
