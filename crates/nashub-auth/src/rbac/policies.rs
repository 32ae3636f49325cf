//! Role-to-permission mapping.
//!
//! The model is flat: `admin` holds every permission, `user` holds the
//! non-administrative ones. Adding a permission here is the only way to
//! change who may do what.

use std::fmt;

use nashub_entity::user::UserRole;

/// A system-level operation subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemPermission {
    /// Read one's own profile.
    ProfileRead,
    /// List all users.
    UserList,
    /// Create users.
    UserCreate,
    /// Delete users.
    UserDelete,
    /// Browse and download files.
    FileRead,
    /// Upload, delete and create folders.
    FileWrite,
    /// List configured shares.
    ShareView,
    /// Create and remove shares.
    ShareManage,
}

impl SystemPermission {
    /// Whether only administrators hold this permission.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Self::UserList | Self::UserCreate | Self::UserDelete | Self::ShareManage
        )
    }

    /// Whether `role` holds this permission.
    pub fn granted_to(&self, role: UserRole) -> bool {
        match role {
            UserRole::Admin => true,
            UserRole::User => !self.is_admin_only(),
        }
    }
}

impl fmt::Display for SystemPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProfileRead => "profile:read",
            Self::UserList => "user:list",
            Self::UserCreate => "user:create",
            Self::UserDelete => "user:delete",
            Self::FileRead => "file:read",
            Self::FileWrite => "file:write",
            Self::ShareView => "share:view",
            Self::ShareManage => "share:manage",
        };
        f.write_str(name)
    }
}
