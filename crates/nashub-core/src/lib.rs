//! # nashub-core
//!
//! Core crate for NasHub. Contains the configuration schemas, the unified
//! error system and the traits that external collaborators (such as the
//! file store) implement.
//!
//! This crate has **no** internal dependencies on other NasHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
