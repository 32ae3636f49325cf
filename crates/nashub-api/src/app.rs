//! Application builder: wires stores and services into an [`AppState`].

use std::sync::Arc;

use tracing::{info, warn};

use nashub_auth::credential::CredentialStore;
use nashub_auth::password::{PasswordHasher, PasswordValidator};
use nashub_auth::rbac::RbacEnforcer;
use nashub_auth::session::{SessionManager, SessionStore};
use nashub_core::config::AppConfig;
use nashub_core::error::AppError;
use nashub_core::traits::FileStore;
use nashub_entity::user::BOOTSTRAP_ADMIN;
use nashub_service::{AdminUserService, FileService, ShareService};
use nashub_storage::LocalFileStore;

use crate::state::AppState;

/// Builds the complete application state from configuration.
///
/// Provisions the bootstrap admin account when the credential store is
/// empty, which is always the case on a fresh process.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Step 1: Storage ──────────────────────────────────────────
    let local = LocalFileStore::new(&config.storage.root, config.storage.create_root).await?;
    info!(root = %local.jail().root().display(), "Storage root ready");
    let file_store: Arc<dyn FileStore> = Arc::new(local);

    // ── Step 2: Credentials ──────────────────────────────────────
    let credentials = tokio::task::spawn_blocking(|| CredentialStore::new(PasswordHasher::new()))
        .await
        .map_err(|e| AppError::internal(format!("Credential store init failed: {e}")))??;
    let credentials = Arc::new(credentials);

    if credentials
        .bootstrap(
            &config.auth.bootstrap_admin_email,
            &config.auth.bootstrap_admin_password,
        )
        .await?
    {
        warn!(
            username = BOOTSTRAP_ADMIN,
            "Provisioned bootstrap admin account with the configured initial password; change it before exposing the appliance"
        );
    }

    // ── Step 3: Sessions ─────────────────────────────────────────
    let sessions = Arc::new(SessionStore::from_config(&config.session));
    let session_manager = SessionManager::new(Arc::clone(&credentials), sessions);

    // ── Step 4: Services ─────────────────────────────────────────
    let rbac = RbacEnforcer::new();
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let admin_users = Arc::new(AdminUserService::new(
        Arc::clone(&credentials),
        session_manager.clone(),
        validator,
        rbac,
    ));
    let file_service = Arc::new(FileService::new(Arc::clone(&file_store), rbac));
    let share_service = Arc::new(ShareService::new(Arc::clone(&file_store), rbac));

    Ok(AppState {
        config: Arc::new(config),
        session_manager: Arc::new(session_manager),
        file_store,
        admin_users,
        file_service,
        share_service,
    })
}
