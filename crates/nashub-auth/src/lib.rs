//! # nashub-auth
//!
//! Identity for the NasHub appliance: who a caller is and what they may do.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `credential`: In-memory user and credential registry
//! - `session`: Opaque bearer sessions (issue, resolve, revoke, sweep)
//! - `rbac`: Two-role authorization policy

pub mod credential;
pub mod password;
pub mod rbac;
pub mod session;

pub use credential::CredentialStore;
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{RbacEnforcer, SystemPermission};
pub use session::{SessionCleanup, SessionLookup, SessionManager, SessionStore};
