//! Session lifecycle: opaque bearer tokens, lookup, revocation and sweeping.

pub mod cleanup;
pub mod manager;
pub mod store;
pub mod token;

pub use cleanup::SessionCleanup;
pub use manager::{LoginResult, SessionManager};
pub use store::{IssuedSession, SessionLookup, SessionStore};
