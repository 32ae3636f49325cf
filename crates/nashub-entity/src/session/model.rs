//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live login session.
///
/// The bearer token itself is never stored; the session store keys this
/// record by the token's SHA-256 digest. Holds only the owning user ID so
/// that identity is re-resolved on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The user this session belongs to.
    pub user_id: u64,
    /// When the session was issued (login time).
    pub issued_at: DateTime<Utc>,
    /// When the session stops being honoured.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired at the given instant.
    ///
    /// A session is still valid at exactly `expires_at` and expired
    /// strictly after it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Check whether the session has expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
