//! Local filesystem file store.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use nashub_core::error::{AppError, ErrorKind};
use nashub_core::result::AppResult;
use nashub_core::traits::{ByteStream, FileEntry, FileStore};

use crate::path::{PathJail, join};

/// File store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Confinement for every resolved path.
    jail: PathJail,
}

impl LocalFileStore {
    /// Create a store rooted at `root_path`, creating it if `create` is set.
    pub async fn new(root_path: &str, create: bool) -> AppResult<Self> {
        Ok(Self {
            jail: PathJail::new(root_path, create).await?,
        })
    }

    /// The path jail backing this store.
    pub fn jail(&self) -> &PathJail {
        &self.jail
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(self.jail.root())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn list(&self, path: &str) -> AppResult<Vec<FileEntry>> {
        let full_path = self.jail.resolve(path).await?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| io_error(e, path, "read directory"))?;
        if !meta.is_dir() {
            return Err(AppError::validation(format!("Not a directory: {path}")));
        }

        let mut dir = fs::read_dir(&full_path)
            .await
            .map_err(|e| io_error(e, path, "list directory"))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            // Follow symlinks for display; dangling links are skipped.
            let Ok(entry_meta) = fs::metadata(entry.path()).await else {
                debug!(path, name = %name, "Skipping unreadable entry");
                continue;
            };
            entries.push(to_entry(name.clone(), join(path, &name), &entry_meta));
        }

        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }

    async fn metadata(&self, path: &str) -> AppResult<FileEntry> {
        let full_path = self.jail.resolve(path).await?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| io_error(e, path, "get metadata"))?;

        Ok(to_entry(display_name(path), path.to_string(), &meta))
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream<'static>> {
        let full_path = self.jail.resolve(path).await?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| io_error(e, path, "open file"))?;
        if meta.is_dir() {
            return Err(AppError::validation(format!("Path is a directory: {path}")));
        }

        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| io_error(e, path, "open file"))?;

        Ok(Box::pin(ReaderStream::new(file)))
    }

    async fn write_stream(&self, path: &str, mut stream: ByteStream<'_>) -> AppResult<u64> {
        let full_path = self.jail.resolve(path).await?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(e, path, "create parent directory"))?;
        }

        let mut file = fs::File::create(&full_path)
            .await
            .map_err(|e| io_error(e, path, "create file"))?;

        let mut total_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let written = match chunk {
                Ok(chunk) => file.write_all(&chunk).await.map(|()| chunk.len()),
                Err(e) => Err(e),
            };
            match written {
                Ok(n) => total_bytes += n as u64,
                Err(e) => {
                    drop(file);
                    discard_partial(&full_path).await;
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to write file: {path}"),
                        e,
                    ));
                }
            }
        }

        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush file", e))?;

        debug!(path, bytes = total_bytes, "Wrote file from stream");
        Ok(total_bytes)
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.jail.resolve_entry(path).await?;
        if self.jail.is_root(&full_path) {
            return Err(AppError::validation("Cannot delete the storage root"));
        }

        let meta = fs::symlink_metadata(&full_path)
            .await
            .map_err(|e| io_error(e, path, "delete"))?;

        let result = if meta.is_dir() {
            fs::remove_dir(&full_path).await
        } else {
            fs::remove_file(&full_path).await
        };

        result.map_err(|e| {
            if e.kind() == io::ErrorKind::DirectoryNotEmpty {
                AppError::conflict(format!("Directory is not empty: {path}"))
            } else {
                io_error(e, path, "delete")
            }
        })?;

        debug!(path, "Deleted");
        Ok(())
    }

    async fn create_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.jail.resolve(path).await?;
        if let Ok(meta) = fs::metadata(&full_path).await {
            if !meta.is_dir() {
                return Err(AppError::conflict(format!("A file already exists at {path}")));
            }
        }

        fs::create_dir_all(&full_path)
            .await
            .map_err(|e| io_error(e, path, "create directory"))?;
        Ok(())
    }
}

fn to_entry(name: String, path: String, meta: &std::fs::Metadata) -> FileEntry {
    FileEntry {
        name,
        path,
        size: if meta.is_dir() { 0 } else { meta.len() },
        is_dir: meta.is_dir(),
        mod_time: meta.modified().ok().map(DateTime::<Utc>::from),
    }
}

fn display_name(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "/".to_string(),
    }
}

async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        debug!(path = %path.display(), error = %e, "Could not remove partial upload");
    }
}

fn io_error(err: io::Error, path: &str, action: &str) -> AppError {
    match err.kind() {
        io::ErrorKind::NotFound => AppError::not_found(format!("Path not found: {path}")),
        io::ErrorKind::AlreadyExists => AppError::conflict(format!("Already exists: {path}")),
        _ => AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to {action}: {path}"),
            err,
        ),
    }
}
