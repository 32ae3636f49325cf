//! Share handlers: list, create, delete.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use nashub_auth::rbac::SystemPermission;
use nashub_service::share::CreateShareRequest as ServiceCreateShare;

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{MessageResponse, ShareListResponse, ShareResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require_permission;
use crate::state::AppState;

/// GET /samba/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ShareListResponse>, ApiError> {
    let shares = state.share_service.list(&auth)?;
    Ok(Json(ShareListResponse { shares }))
}

/// POST /samba/shares
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<ValidatedJson<CreateShareRequest>, ApiError>,
) -> Result<(StatusCode, Json<ShareResponse>), ApiError> {
    require_permission(&auth, SystemPermission::ShareManage)?;
    let ValidatedJson(req) = body?;

    let share = state
        .share_service
        .create(
            &auth,
            ServiceCreateShare {
                name: req.name,
                path: req.path,
                comment: req.comment,
                read_only: req.read_only,
                guest_access: req.guest_access,
                users: req.users,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ShareResponse { share })))
}

/// DELETE /samba/shares/{name}
pub async fn delete_share(
    State(state): State<AppState>,
    auth: AuthUser,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_permission(&auth, SystemPermission::ShareManage)?;
    let Path(name) = name?;
    state.share_service.delete(&auth, &name)?;
    Ok(Json(MessageResponse::new("Share deleted successfully")))
}
