//! In-memory session store.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use nashub_core::config::SessionConfig;
use nashub_core::error::AppError;
use nashub_entity::session::Session;

use super::token::{generate_token, token_digest};

/// Outcome of resolving a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    /// The token maps to a live session.
    Active(Session),
    /// No session exists for the token.
    Absent,
    /// The session existed but had expired; it has now been removed.
    Expired,
}

/// A freshly issued session and the token that unlocks it.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Opaque bearer token. Only ever handed to the client.
    pub token: String,
    /// The stored session.
    pub session: Session,
}

/// Concurrent token → session map.
///
/// Keys are SHA-256 digests of tokens. Expired sessions are evicted lazily
/// by [`resolve`](Self::resolve) and in bulk by
/// [`purge_expired`](Self::purge_expired).
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store with the given session lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Creates an empty store using the configured lifetime.
    pub fn from_config(config: &SessionConfig) -> Self {
        let hours = i64::try_from(config.ttl_hours).unwrap_or(i64::MAX);
        let ttl = Duration::try_hours(hours).unwrap_or(Duration::MAX);
        Self::new(ttl)
    }

    /// Session lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a new session for `user_id`.
    pub fn issue(&self, user_id: u64) -> Result<IssuedSession, AppError> {
        let token = generate_token()?;
        let issued_at = Utc::now();
        let session = Session {
            user_id,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(self.ttl)
                .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC),
        };

        match self.sessions.entry(token_digest(&token)) {
            Entry::Occupied(_) => return Err(AppError::internal("Session token collision")),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
            }
        }

        Ok(IssuedSession { token, session })
    }

    /// Resolves a token, evicting the session if it has expired.
    pub fn resolve(&self, token: &str) -> SessionLookup {
        let key = token_digest(token);
        let now = Utc::now();

        let Some(session) = self.sessions.get(&key).map(|r| r.value().clone()) else {
            return SessionLookup::Absent;
        };

        if !session.is_expired_at(now) {
            return SessionLookup::Active(session);
        }

        self.sessions.remove_if(&key, |_, s| s.is_expired_at(now));
        SessionLookup::Expired
    }

    /// Removes the session for `token`. Revoking an unknown token is not an
    /// error; returns whether a session was removed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(&token_digest(token)).is_some()
    }

    /// Removes every session owned by `user_id`, returning how many.
    pub fn revoke_user(&self, user_id: u64) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, s| {
            let keep = s.user_id != user_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Removes every expired session, returning how many.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        self.sessions.retain(|_, s| {
            let keep = !s.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of stored sessions, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
