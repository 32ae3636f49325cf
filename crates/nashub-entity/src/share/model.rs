//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A network file share exported by the appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Share name as seen by clients.
    pub name: String,
    /// Sanitised store path of the shared directory.
    pub path: String,
    /// Free-form description.
    pub comment: String,
    /// Whether clients may only read.
    pub read_only: bool,
    /// Whether unauthenticated guests may connect.
    pub guest_access: bool,
    /// Accounts allowed to connect when guest access is off.
    pub users: Vec<String>,
    /// Who created the share.
    pub created_by: String,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}
