//! Current-user handler.

use axum::Json;

use nashub_auth::rbac::SystemPermission;

use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_permission;

/// GET /user
pub async fn current_user(auth: AuthUser) -> Result<Json<UserResponse>, ApiError> {
    require_permission(&auth, SystemPermission::ProfileRead)?;
    Ok(Json(UserResponse {
        user: auth.0.user,
    }))
}
