//! # nashub-api
//!
//! HTTP API layer for NasHub built on Axum.
//!
//! Provides the REST endpoints, the access middleware, extractors, DTOs,
//! and the mapping from [`AppError`](nashub_core::AppError) to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_state;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
