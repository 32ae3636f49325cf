//! User domain entities.

pub mod model;
pub mod role;

pub use model::{BOOTSTRAP_ADMIN, Credential, User};
pub use role::UserRole;
