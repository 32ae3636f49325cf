//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// Username of the account provisioned on first start.
///
/// This account can never be deleted.
pub const BOOTSTRAP_ADMIN: &str = "admin";

/// A registered user of the appliance.
///
/// Carries no secret material; the password hash lives in the matching
/// [`Credential`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    /// Unique login name (case-sensitive).
    pub username: String,
    /// Email address.
    pub email: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// When the user was created.
    pub created: DateTime<Utc>,
    /// Last successful login time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// The stored secret for one user.
///
/// Created together with its [`User`] and never serialized.
#[derive(Clone)]
pub struct Credential {
    /// Owning username.
    pub username: String,
    /// PHC-formatted Argon2id hash.
    pub password_hash: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
