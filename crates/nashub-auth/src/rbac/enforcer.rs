//! RBAC enforcement logic: checks whether a role has a required system permission.

use tracing::warn;

use nashub_core::error::AppError;
use nashub_entity::user::{BOOTSTRAP_ADMIN, User, UserRole};

use super::policies::SystemPermission;

/// Enforces role-based access control for system-level operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the given role has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or a `Forbidden` error if denied.
    pub fn require_permission(
        &self,
        role: UserRole,
        permission: SystemPermission,
    ) -> Result<(), AppError> {
        if permission.granted_to(role) {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin access required"))
        }
    }

    /// Checks that `user` holds `permission`, logging denials.
    pub fn authorize(&self, user: &User, permission: SystemPermission) -> Result<(), AppError> {
        self.require_permission(user.role, permission)
            .inspect_err(|_| {
                warn!(
                    user_id = user.id,
                    username = %user.username,
                    permission = %permission,
                    "Permission denied"
                );
            })
    }

    /// Rejects deletion of the bootstrap admin account, whoever asks.
    pub fn ensure_deletable(username: &str) -> Result<(), AppError> {
        if username == BOOTSTRAP_ADMIN {
            return Err(AppError::validation("Cannot delete the admin user"));
        }
        Ok(())
    }
}
