//! Confinement of store paths to the storage root.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use nashub_core::error::{AppError, ErrorKind};

/// Maps sanitised store paths onto the filesystem beneath a fixed root.
///
/// The deepest existing ancestor of every resolved location is
/// canonicalised, following symlinks, and must still lie under the
/// canonical root. A symlink inside the share that points elsewhere is
/// therefore refused.
#[derive(Debug, Clone)]
pub struct PathJail {
    root: PathBuf,
}

impl PathJail {
    /// Opens a jail at `root`, creating the directory first if asked to.
    pub async fn new(root: impl AsRef<Path>, create: bool) -> Result<Self, AppError> {
        let root = root.as_ref();
        if create {
            fs::create_dir_all(root).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create storage root: {}", root.display()),
                    e,
                )
            })?;
        }

        let root = fs::canonicalize(root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Storage root is not accessible: {}", root.display()),
                e,
            )
        })?;

        Ok(Self { root })
    }

    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `store_path`, following symlinks all the way down.
    pub async fn resolve(&self, store_path: &str) -> Result<PathBuf, AppError> {
        let candidate = self.root.join(store_path.trim_start_matches('/'));

        let mut existing = candidate.as_path();
        let mut missing = Vec::new();
        let canonical = loop {
            match fs::canonicalize(existing).await {
                Ok(path) => break path,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    let (Some(parent), Some(name)) = (existing.parent(), existing.file_name())
                    else {
                        return Err(AppError::not_found(format!("Path not found: {store_path}")));
                    };
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to resolve path: {store_path}"),
                        e,
                    ));
                }
            }
        };

        self.ensure_contained(&canonical, store_path)?;

        Ok(missing
            .into_iter()
            .rev()
            .fold(canonical, |path, name| path.join(name)))
    }

    /// Resolves the parent of `store_path` but keeps the final component
    /// as-is, so a symlink at that position is addressed itself rather
    /// than its target.
    pub async fn resolve_entry(&self, store_path: &str) -> Result<PathBuf, AppError> {
        let trimmed = store_path.trim_end_matches('/');
        let Some((parent, name)) = trimmed.rsplit_once('/') else {
            return Ok(self.root.clone());
        };
        if name.is_empty() {
            return Ok(self.root.clone());
        }
        let parent = self.resolve(if parent.is_empty() { "/" } else { parent }).await?;
        Ok(parent.join(name))
    }

    /// Whether `path` is the root itself.
    pub fn is_root(&self, path: &Path) -> bool {
        path == self.root
    }

    fn ensure_contained(&self, canonical: &Path, store_path: &str) -> Result<(), AppError> {
        if canonical.starts_with(&self.root) {
            Ok(())
        } else {
            warn!(path = %store_path, "Path escapes storage root");
            Err(AppError::forbidden("Access outside the storage root is not allowed"))
        }
    }
}
