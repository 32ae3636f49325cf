//! Route definitions for the NasHub HTTP API.
//!
//! All routes are organized by domain and nested under the configured API
//! prefix (`/api/v1` by default). Everything except login, logout and
//! health sits behind the access middleware.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.server.max_upload_bytes).unwrap_or(usize::MAX);
    let prefix = format!("/{}", state.config.server.api_prefix.trim_matches('/'));

    let protected_routes = Router::new()
        .merge(user_routes())
        .merge(admin_routes())
        .merge(file_routes())
        .merge(share_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ));

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(health_routes())
        .merge(protected_routes);

    let router = if prefix == "/" {
        api_routes
    } else {
        Router::new().nest(&prefix, api_routes)
    };

    let cors = build_cors_layer(&state.config.server.cors);

    router
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Current user
fn user_routes() -> Router<AppState> {
    Router::new().route("/user", get(handlers::user::current_user))
}

/// Admin user management
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::admin::users::list_users).post(handlers::admin::users::create_user),
        )
        .route(
            "/users/{username}",
            delete(handlers::admin::users::delete_user),
        )
}

/// File browsing and transfer
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).delete(handlers::file::delete_file),
        )
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/download", get(handlers::file::download_file))
        .route("/files/folder", post(handlers::file::create_folder))
}

/// Share registry, at the paths existing Samba clients use
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/samba/shares",
            get(handlers::share::list_shares).post(handlers::share::create_share),
        )
        .route(
            "/samba/shares/{name}",
            delete(handlers::share::delete_share),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
