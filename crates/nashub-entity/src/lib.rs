//! # nashub-entity
//!
//! Domain entity models for NasHub. Every struct in this crate is an
//! in-memory record owned by one of the stores, or a domain value object.
//! All entities derive `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod session;
pub mod share;
pub mod user;
