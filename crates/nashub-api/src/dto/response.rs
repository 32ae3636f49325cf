//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nashub_entity::share::Share;
use nashub_entity::user::User;

/// Login response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// When the token stops working.
    pub expires_at: DateTime<Utc>,
    /// The logged-in user.
    pub user: User,
}

/// A single user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    /// The user.
    pub user: User,
}

/// All users.
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    /// Users ordered by ID.
    pub users: Vec<User>,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Server version.
    pub version: String,
    /// Storage root reachability ("available" or "unavailable").
    pub storage: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Upload result.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Message text.
    pub message: String,
    /// Stored file name.
    pub filename: String,
    /// Bytes written.
    pub size: u64,
    /// Store path of the file.
    pub path: String,
}

/// Folder creation result.
#[derive(Debug, Clone, Serialize)]
pub struct FolderResponse {
    /// Message text.
    pub message: String,
    /// Store path of the folder.
    pub path: String,
}

/// A single share.
#[derive(Debug, Clone, Serialize)]
pub struct ShareResponse {
    /// The share.
    pub share: Share,
}

/// All shares.
#[derive(Debug, Clone, Serialize)]
pub struct ShareListResponse {
    /// Shares ordered by name.
    pub shares: Vec<Share>,
}
