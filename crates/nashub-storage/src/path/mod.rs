//! Path policy and storage-root confinement.

pub mod jail;
pub mod policy;

pub use jail::PathJail;
pub use policy::{join, sanitize, sanitize_name, validate_share_name};
