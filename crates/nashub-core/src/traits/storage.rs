//! File store trait for the filesystem collaborator behind file and share
//! operations.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a file or directory inside the store.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Final path component.
    pub name: String,
    /// Sanitised store path (always starts with `/`).
    pub path: String,
    /// Size in bytes (zero for directories).
    pub size: u64,
    /// Whether this is a directory.
    pub is_dir: bool,
    /// Last modified timestamp, when the platform reports one.
    pub mod_time: Option<DateTime<Utc>>,
}

/// A byte stream type used for reading and writing file contents.
///
/// Streams returned by [`FileStore::read`] are `'static`; upload streams may
/// borrow from the request they are read out of.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Trait for the file store backing the file and share endpoints.
///
/// Every `path` argument is a store path that has already passed the
/// path policy; implementations are still responsible for confining the
/// resolved location to their root.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// List the contents of a directory.
    async fn list(&self, path: &str) -> AppResult<Vec<FileEntry>>;

    /// Get metadata about a file or directory.
    async fn metadata(&self, path: &str) -> AppResult<FileEntry>;

    /// Read a file and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream<'static>>;

    /// Write a byte stream to a file, replacing any existing file.
    /// Returns the number of bytes written.
    async fn write_stream(&self, path: &str, stream: ByteStream<'_>) -> AppResult<u64>;

    /// Delete a file or an empty directory.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Create a directory (and any missing parents).
    async fn create_dir(&self, path: &str) -> AppResult<()>;
}
