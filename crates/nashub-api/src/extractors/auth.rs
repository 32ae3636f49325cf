//! `AuthUser` extractor: hands handlers the identity resolved by the
//! access middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nashub_core::error::AppError;
use nashub_service::context::RequestContext;

use crate::error::ApiError;

/// Extracted authenticated user context available in handlers.
///
/// Only routes behind [`require_session`](crate::middleware::auth::require_session)
/// carry a context; anywhere else extraction fails with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::unauthenticated("Authentication required")))
    }
}
