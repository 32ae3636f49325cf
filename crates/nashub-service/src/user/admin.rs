//! Admin user management: list, create, delete.

use std::sync::Arc;

use tracing::info;

use nashub_auth::credential::CredentialStore;
use nashub_auth::password::PasswordValidator;
use nashub_auth::rbac::{RbacEnforcer, SystemPermission};
use nashub_auth::session::SessionManager;
use nashub_core::error::AppError;
use nashub_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User and credential registry.
    credentials: Arc<CredentialStore>,
    /// Session manager, for revoking a deleted user's sessions.
    sessions: SessionManager,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// RBAC enforcer.
    rbac: RbacEnforcer,
}

/// Request to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    /// Username (unique, case-sensitive).
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role assignment; `user` when omitted.
    pub role: Option<UserRole>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        credentials: Arc<CredentialStore>,
        sessions: SessionManager,
        validator: Arc<PasswordValidator>,
        rbac: RbacEnforcer,
    ) -> Self {
        Self {
            credentials,
            sessions,
            validator,
            rbac,
        }
    }

    /// Lists all users.
    pub fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::UserList)?;
        Ok(self.credentials.list())
    }

    /// Creates a new user.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::UserCreate)?;

        if req.username.trim().is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        if req.username.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::validation(
                "Username must not contain whitespace",
            ));
        }
        self.validator.validate(&req.password)?;

        let user = self
            .credentials
            .create(
                &req.username,
                &req.email,
                req.role.unwrap_or_default(),
                &req.password,
            )
            .await?;

        info!(
            admin = %ctx.username(),
            user_id = user.id,
            username = %user.username,
            "Admin created user"
        );

        Ok(user)
    }

    /// Deletes a user and ends all of their sessions.
    pub fn delete_user(&self, ctx: &RequestContext, username: &str) -> Result<(), AppError> {
        self.rbac.authorize(&ctx.user, SystemPermission::UserDelete)?;
        RbacEnforcer::ensure_deletable(username)?;

        let user = self.credentials.delete(username)?;
        let revoked = self.sessions.revoke_user_sessions(user.id);

        info!(
            admin = %ctx.username(),
            user_id = user.id,
            username = %username,
            revoked_sessions = revoked,
            "Admin deleted user"
        );

        Ok(())
    }
}
