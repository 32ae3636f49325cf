//! Admin user management.

pub mod admin;

pub use admin::{AdminUserService, CreateUserRequest};
