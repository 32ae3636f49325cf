//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Always answers 200; an unreachable storage root reports `degraded`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage_ok = match state.file_store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Storage health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if storage_ok { "ok" } else { "degraded" }.to_string(),
        service: "nashub".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: if storage_ok { "available" } else { "unavailable" }.to_string(),
        timestamp: Utc::now(),
    })
}
