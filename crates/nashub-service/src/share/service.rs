//! Share registry service.
//!
//! Shares live in memory for the lifetime of the process. Exporting them
//! to a file-sharing daemon is left to the host.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use nashub_auth::rbac::{RbacEnforcer, SystemPermission};
use nashub_core::error::AppError;
use nashub_core::traits::FileStore;
use nashub_entity::share::Share;
use nashub_storage::path::{sanitize, validate_share_name};

use crate::context::RequestContext;

/// Request to create a new share.
#[derive(Debug, Clone, Default)]
pub struct CreateShareRequest {
    /// Share name.
    pub name: String,
    /// Directory to export, relative to the storage root.
    pub path: String,
    /// Optional description.
    pub comment: Option<String>,
    /// Read-only export.
    pub read_only: bool,
    /// Allow guest connections.
    pub guest_access: bool,
    /// Accounts allowed to connect.
    pub users: Vec<String>,
}

/// Manages share creation, listing, and removal.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Name → share.
    shares: Arc<DashMap<String, Share>>,
    /// Store used to make sure the shared directory exists.
    store: Arc<dyn FileStore>,
    /// RBAC enforcer.
    rbac: RbacEnforcer,
}

impl ShareService {
    /// Creates a new share service with an empty registry.
    pub fn new(store: Arc<dyn FileStore>, rbac: RbacEnforcer) -> Self {
        Self {
            shares: Arc::new(DashMap::new()),
            store,
            rbac,
        }
    }

    /// Lists all shares ordered by name.
    pub fn list(&self, ctx: &RequestContext) -> Result<Vec<Share>, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::ShareView)?;

        let mut shares: Vec<Share> = self.shares.iter().map(|r| r.value().clone()).collect();
        shares.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(shares)
    }

    /// Creates a share, creating its directory if needed.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateShareRequest,
    ) -> Result<Share, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::ShareManage)?;

        let name = validate_share_name(&req.name)?.to_string();
        let path = sanitize(&req.path)?;

        if self.shares.contains_key(&name) {
            return Err(duplicate(&name));
        }

        self.store.create_dir(&path).await?;

        let share = Share {
            name: name.clone(),
            path,
            comment: req.comment.unwrap_or_default(),
            read_only: req.read_only,
            guest_access: req.guest_access,
            users: req.users,
            created_by: ctx.username().to_string(),
            created_at: Utc::now(),
        };

        match self.shares.entry(name) {
            Entry::Occupied(slot) => return Err(duplicate(slot.key())),
            Entry::Vacant(slot) => {
                slot.insert(share.clone());
            }
        }

        info!(
            user_id = ctx.user_id(),
            share = %share.name,
            path = %share.path,
            "Share created"
        );

        Ok(share)
    }

    /// Removes a share. The shared directory is left untouched.
    pub fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::ShareManage)?;

        self.shares
            .remove(name)
            .ok_or_else(|| AppError::not_found(format!("Share '{name}' not found")))?;

        info!(user_id = ctx.user_id(), share = %name, "Share deleted");
        Ok(())
    }
}

fn duplicate(name: &str) -> AppError {
    AppError::conflict(format!("Share '{name}' already exists"))
}
