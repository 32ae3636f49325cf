//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};

use nashub_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the access middleware from a freshly re-resolved [`User`] and
/// passed into service methods so that every operation knows *who* is
/// acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user, as currently stored.
    pub user: User,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: User) -> Self {
        Self {
            user,
            request_time: Utc::now(),
        }
    }

    /// The authenticated user's ID.
    pub fn user_id(&self) -> u64 {
        self.user.id
    }

    /// The authenticated user's name.
    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}
