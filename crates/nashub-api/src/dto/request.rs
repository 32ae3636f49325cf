//! Request DTOs with validation.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use nashub_entity::user::UserRole;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password. Length policy is applied by the service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Role; defaults to `user`.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<UserRole>,
}

/// Query string carrying a store path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathQuery {
    /// Store path; optional where the root is a sensible default.
    pub path: Option<String>,
}

/// Create folder request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Parent directory.
    #[serde(default)]
    pub path: String,
    /// New folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
}

/// Create share request (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    /// Share name.
    #[validate(length(min = 1, max = 80, message = "Share name is required"))]
    pub name: String,
    /// Directory to export.
    #[validate(length(min = 1, message = "Share path is required"))]
    pub path: String,
    /// Description.
    #[serde(default)]
    pub comment: Option<String>,
    /// Read-only export.
    #[serde(default)]
    pub read_only: bool,
    /// Guest access.
    #[serde(default)]
    pub guest_access: bool,
    /// Allowed accounts.
    #[serde(default)]
    pub users: Vec<String>,
}

/// Reads an optional role where `""` means "not given".
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<UserRole>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: nashub_core::error::AppError| serde::de::Error::custom(e.message)),
    }
}
