//! Network share registry.

pub mod service;

pub use service::{CreateShareRequest, ShareService};
