//! Access middleware for protected routes.
//!
//! This is the only place a bearer token is turned into an identity. The
//! resolved user is stored in the request extensions as a
//! [`RequestContext`], where [`AuthUser`](crate::extractors::AuthUser)
//! picks it up.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use nashub_core::error::AppError;
use nashub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from the `Authorization` header.
///
/// The `Bearer ` prefix is optional and case-sensitive; whatever follows
/// it is the token, byte for byte. Returns `None` when the header is
/// missing, not valid ASCII, or leaves an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
    (!token.is_empty()).then_some(token)
}

/// Rejects the request with 401 unless it carries a live session whose
/// user still exists.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = {
        let Some(token) = bearer_token(request.headers()) else {
            debug!(
                reason = "missing",
                path = %request.uri().path(),
                "Authentication failed"
            );
            return Err(AppError::unauthenticated("Authentication required").into());
        };
        state.session_manager.authenticate(token)?
    };

    request.extensions_mut().insert(RequestContext::new(user));
    Ok(next.run(request).await)
}
