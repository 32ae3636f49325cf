//! User and credential registry.

pub mod store;

pub use store::CredentialStore;
