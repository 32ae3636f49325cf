//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use nashub_auth::session::SessionManager;
use nashub_core::config::AppConfig;
use nashub_core::traits::FileStore;
use nashub_service::{AdminUserService, FileService, ShareService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, logout and token authentication
    pub session_manager: Arc<SessionManager>,

    // ── Storage ──────────────────────────────────────────────
    /// File store confined to the storage root
    pub file_store: Arc<dyn FileStore>,

    // ── Services ─────────────────────────────────────────────
    /// Admin user management
    pub admin_users: Arc<AdminUserService>,
    /// File browsing and transfer
    pub file_service: Arc<FileService>,
    /// Share registry
    pub share_service: Arc<ShareService>,
}
