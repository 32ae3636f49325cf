//! # nashub-storage
//!
//! Everything that turns a client-supplied path into a filesystem location:
//! lexical sanitisation, confinement to the storage root, and the local
//! [`FileStore`](nashub_core::traits::FileStore) implementation.

pub mod path;
pub mod providers;

pub use path::{PathJail, join, sanitize, sanitize_name, validate_share_name};
#[cfg(feature = "local")]
pub use providers::LocalFileStore;
