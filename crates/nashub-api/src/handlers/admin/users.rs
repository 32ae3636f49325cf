//! Admin user management handlers.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use nashub_auth::rbac::SystemPermission;
use nashub_service::user::CreateUserRequest as ServiceCreateUser;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::{MessageResponse, UserListResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require_permission;
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.admin_users.list_users(&auth)?;
    Ok(Json(UserListResponse { users }))
}

/// POST /users
///
/// The caller is authorized before the body is inspected, so non-admins
/// get 403 whatever they send.
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<ValidatedJson<CreateUserRequest>, ApiError>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    require_permission(&auth, SystemPermission::UserCreate)?;
    let ValidatedJson(req) = body?;

    let user = state
        .admin_users
        .create_user(
            &auth,
            ServiceCreateUser {
                username: req.username,
                email: req.email,
                password: req.password,
                role: req.role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// DELETE /users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    username: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_permission(&auth, SystemPermission::UserDelete)?;
    let Path(username) = username?;
    state.admin_users.delete_user(&auth, &username)?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
