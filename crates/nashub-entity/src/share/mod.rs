//! File share domain entities.

pub mod model;

pub use model::Share;
