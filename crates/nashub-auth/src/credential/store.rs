//! In-memory user registry with Argon2id credentials.
//!
//! Users and their credentials live in one record keyed by username, so a
//! user can never exist without its credential. A second index maps the
//! numeric user ID back to the username for session resolution.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use nashub_core::error::AppError;
use nashub_entity::user::{BOOTSTRAP_ADMIN, Credential, User, UserRole};

use crate::password::PasswordHasher;
use crate::rbac::RbacEnforcer;

/// Verified against when the username is unknown, so that a miss costs
/// the same Argon2 work as a wrong password.
const TIMING_DUMMY_PASSWORD: &str = "nashub-timing-equaliser";

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    credential: Credential,
}

/// Concurrent user and credential store.
///
/// No map guard is ever held across an `.await`: hashes are computed on the
/// blocking pool first and the maps are touched only afterwards.
#[derive(Debug)]
pub struct CredentialStore {
    /// Username → user + credential.
    users: DashMap<String, UserRecord>,
    /// User ID → username.
    ids: DashMap<u64, String>,
    /// Next user ID to hand out.
    next_id: AtomicU64,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Hash used to equalise verification time for unknown usernames.
    dummy_hash: String,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new(hasher: PasswordHasher) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash_password(TIMING_DUMMY_PASSWORD)?;
        Ok(Self {
            users: DashMap::new(),
            ids: DashMap::new(),
            next_id: AtomicU64::new(1),
            hasher,
            dummy_hash,
        })
    }

    /// Provisions the bootstrap `admin` account if the store is empty.
    ///
    /// Returns `true` when the account was created.
    pub async fn bootstrap(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if !self.users.is_empty() {
            return Ok(false);
        }

        match self
            .create(BOOTSTRAP_ADMIN, email, UserRole::Admin, password)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind == nashub_core::error::ErrorKind::Conflict => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Creates a user together with its credential.
    ///
    /// Usernames are compared case-sensitively. The plaintext password is
    /// dropped once hashed.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        role: UserRole,
        password: &str,
    ) -> Result<User, AppError> {
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }

        // Cheap early rejection; the entry check below is authoritative.
        if self.users.contains_key(username) {
            return Err(duplicate(username));
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;

        let user = match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => return Err(duplicate(username)),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    username: username.to_string(),
                    email: email.to_string(),
                    role,
                    created: Utc::now(),
                    last_login: None,
                };
                slot.insert(UserRecord {
                    user: user.clone(),
                    credential: Credential {
                        username: username.to_string(),
                        password_hash,
                    },
                });
                user
            }
        };
        self.ids.insert(user.id, user.username.clone());

        info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Checks a username/password pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error after
    /// the same amount of hashing work.
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, AppError> {
        let candidate = self
            .users
            .get(username)
            .map(|r| (r.user.id, r.credential.password_hash.clone()));

        let (expected_id, hash) = match candidate {
            Some((id, hash)) => (Some(id), hash),
            None => (None, self.dummy_hash.clone()),
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), hash)
            .await?;

        let Some(expected_id) = expected_id else {
            debug!(username = %username, "Login attempt for unknown user");
            return Err(AppError::invalid_credentials());
        };
        if !matches {
            debug!(username = %username, "Login attempt with wrong password");
            return Err(AppError::invalid_credentials());
        }

        // The account may have been deleted (or deleted and recreated)
        // while the hash was being checked.
        self.users
            .get(username)
            .filter(|r| r.user.id == expected_id)
            .map(|r| r.user.clone())
            .ok_or_else(AppError::invalid_credentials)
    }

    /// Stamps the user's last-login time and returns the updated user.
    ///
    /// Returns `None` if the user no longer exists.
    pub fn record_login(&self, user_id: u64) -> Option<User> {
        let username = self.ids.get(&user_id).map(|r| r.value().clone())?;
        let mut record = self.users.get_mut(&username)?;
        if record.user.id != user_id {
            return None;
        }
        record.user.last_login = Some(Utc::now());
        Some(record.user.clone())
    }

    /// Finds a user by ID.
    pub fn find_by_id(&self, user_id: u64) -> Option<User> {
        let username = self.ids.get(&user_id).map(|r| r.value().clone())?;
        self.users
            .get(&username)
            .filter(|r| r.user.id == user_id)
            .map(|r| r.user.clone())
    }

    /// Finds a user by username.
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|r| r.user.clone())
    }

    /// Lists all users ordered by ID. No secrets are included.
    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.user.clone()).collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Deletes a user and its credential, returning the removed user.
    ///
    /// The bootstrap admin account is protected.
    pub fn delete(&self, username: &str) -> Result<User, AppError> {
        RbacEnforcer::ensure_deletable(username)?;

        let (_, record) = self
            .users
            .remove(username)
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;
        self.ids.remove(&record.user.id);

        info!(user_id = record.user.id, username = %username, "User deleted");
        Ok(record.user)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn duplicate(username: &str) -> AppError {
    AppError::conflict(format!("Username '{username}' already exists"))
}
