//! Session lifecycle manager: login, logout and token authentication.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use nashub_core::error::AppError;
use nashub_entity::user::User;

use crate::credential::CredentialStore;

use super::store::{SessionLookup, SessionStore};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Opaque bearer token for the new session.
    pub token: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user, with `last_login` already updated.
    pub user: User,
}

/// Ties credentials to sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User and credential registry.
    credentials: Arc<CredentialStore>,
    /// Session persistence.
    sessions: Arc<SessionStore>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(credentials: Arc<CredentialStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Verify the username/password pair
    /// 2. Issue a fresh session
    /// 3. Stamp the user's last-login time
    ///
    /// Every call issues its own session, so concurrent logins for one
    /// user all succeed independently.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = match self.credentials.verify(username, password).await {
            Ok(user) => user,
            Err(e) => {
                warn!(username = %username, "Login failed");
                return Err(e);
            }
        };

        let issued = self.sessions.issue(user.id)?;

        let Some(user) = self.credentials.record_login(user.id) else {
            // Deleted between verification and issue.
            self.sessions.revoke(&issued.token);
            warn!(username = %username, "Login raced with account deletion");
            return Err(AppError::invalid_credentials());
        };

        info!(
            user_id = user.id,
            username = %user.username,
            expires_at = %issued.session.expires_at,
            "User logged in"
        );

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.session.expires_at,
            user,
        })
    }

    /// Ends the session identified by `token`. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        if self.sessions.revoke(token) {
            info!("Session revoked by logout");
        } else {
            debug!("Logout for unknown session ignored");
        }
    }

    /// Resolves a bearer token to the current state of its owning user.
    ///
    /// All failures carry the same message; the reason only reaches the
    /// logs.
    pub fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let session = match self.sessions.resolve(token) {
            SessionLookup::Active(session) => session,
            SessionLookup::Absent => {
                debug!(reason = "absent", "Authentication failed");
                return Err(invalid_session());
            }
            SessionLookup::Expired => {
                debug!(reason = "expired", "Authentication failed");
                return Err(invalid_session());
            }
        };

        self.credentials.find_by_id(session.user_id).ok_or_else(|| {
            warn!(
                reason = "user_deleted",
                user_id = session.user_id,
                "Authentication failed"
            );
            invalid_session()
        })
    }

    /// Revokes all sessions belonging to `user_id`.
    pub fn revoke_user_sessions(&self, user_id: u64) -> usize {
        let count = self.sessions.revoke_user(user_id);
        if count > 0 {
            info!(user_id = user_id, count = count, "Revoked user sessions");
        }
        count
    }

    /// The underlying session store.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }
}

fn invalid_session() -> AppError {
    AppError::unauthenticated("Invalid or expired session")
}
