//! File operations beneath the storage root.
//!
//! Every client path passes through [`sanitize`] before it reaches the
//! [`FileStore`], and every separately supplied name through
//! [`sanitize_name`].

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use nashub_auth::rbac::{RbacEnforcer, SystemPermission};
use nashub_core::error::AppError;
use nashub_core::traits::{ByteStream, FileEntry, FileStore};
use nashub_storage::path::{join, sanitize, sanitize_name};

use crate::context::RequestContext;

/// Contents of one directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryListing {
    /// The sanitised path that was listed.
    pub current_path: String,
    /// Entries, directories first, then by name.
    pub files: Vec<FileEntry>,
    /// Sum of the sizes of the listed files.
    pub total_size: u64,
}

/// Outcome of a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    /// Stored file name.
    pub filename: String,
    /// Bytes written.
    pub size: u64,
    /// Store path of the new file.
    pub path: String,
}

/// A file ready to be streamed to the client.
pub struct Download {
    /// File metadata.
    pub entry: FileEntry,
    /// File content.
    pub stream: ByteStream<'static>,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download").field("entry", &self.entry).finish()
    }
}

/// Browses and modifies files for authenticated users.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Backing store.
    store: Arc<dyn FileStore>,
    /// RBAC enforcer.
    rbac: RbacEnforcer,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(store: Arc<dyn FileStore>, rbac: RbacEnforcer) -> Self {
        Self { store, rbac }
    }

    /// Lists a directory. `None` lists the root.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        raw_path: Option<&str>,
    ) -> Result<DirectoryListing, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::FileRead)?;

        let path = sanitize(raw_path.unwrap_or("/"))?;
        let files = self.store.list(&path).await?;
        let total_size = files.iter().filter(|f| !f.is_dir).map(|f| f.size).sum();

        Ok(DirectoryListing {
            current_path: path,
            files,
            total_size,
        })
    }

    /// Stores an uploaded file named `filename` inside directory `raw_dir`.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        raw_dir: Option<&str>,
        filename: &str,
        body: ByteStream<'_>,
    ) -> Result<UploadedFile, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::FileWrite)?;

        let dir = sanitize(raw_dir.unwrap_or("/"))?;
        let filename = sanitize_name(filename)?;
        let path = join(&dir, filename);

        let size = self.store.write_stream(&path, body).await?;

        info!(
            user_id = ctx.user_id(),
            path = %path,
            size = size,
            "File uploaded"
        );

        Ok(UploadedFile {
            filename: filename.to_string(),
            size,
            path,
        })
    }

    /// Opens a file for download.
    pub async fn download(&self, ctx: &RequestContext, raw_path: &str) -> Result<Download, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::FileRead)?;

        let path = sanitize(raw_path)?;
        let entry = self.store.metadata(&path).await?;
        if entry.is_dir {
            return Err(AppError::validation("Cannot download a directory"));
        }
        let stream = self.store.read(&path).await?;

        Ok(Download { entry, stream })
    }

    /// Deletes a file or an empty directory.
    pub async fn delete(&self, ctx: &RequestContext, raw_path: &str) -> Result<String, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::FileWrite)?;

        let path = sanitize(raw_path)?;
        if path == "/" {
            return Err(AppError::validation("Cannot delete the storage root"));
        }
        self.store.delete(&path).await?;

        info!(user_id = ctx.user_id(), path = %path, "Path deleted");
        Ok(path)
    }

    /// Creates folder `name` inside directory `raw_parent`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        raw_parent: &str,
        name: &str,
    ) -> Result<String, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::FileWrite)?;

        let parent = sanitize(raw_parent)?;
        let path = join(&parent, sanitize_name(name)?);
        self.store.create_dir(&path).await?;

        info!(user_id = ctx.user_id(), path = %path, "Folder created");
        Ok(path)
    }
}
