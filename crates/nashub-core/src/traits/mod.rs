//! Core traits defined in `nashub-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, FileEntry, FileStore};
