//! RBAC helpers for handlers that must reject a caller before touching the
//! request body.

use nashub_auth::rbac::{RbacEnforcer, SystemPermission};

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Checks that the authenticated user holds `permission`.
pub fn require_permission(auth: &AuthUser, permission: SystemPermission) -> Result<(), ApiError> {
    RbacEnforcer::new()
        .authorize(&auth.user, permission)
        .map_err(ApiError::from)
}
