//! Auth handlers: login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use nashub_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        user: result.user,
    }))
}

/// POST /auth/logout
///
/// Revoking an unknown or already revoked token still succeeds; only a
/// missing or empty `Authorization` header is an error. A header holding
/// nothing but the `Bearer ` prefix names no session and revokes nothing.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    if headers.get(AUTHORIZATION).is_none_or(|v| v.is_empty()) {
        return Err(AppError::validation("No token provided").into());
    }

    if let Some(token) = bearer_token(&headers) {
        state.session_manager.logout(token);
    }

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
