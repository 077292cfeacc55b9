//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (documents are in place)
//! - GET /health - Full health status
//! - GET /progress - Refresh progress, same check as readiness

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{HealthResponse, ProgressResponse};
use crate::api::state::AppState;
use crate::loader::{DIMENSIONS_FILE, FACTS_FILE};

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once both required documents exist in the static folder.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_documents(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let data_ready = check_documents(&state).await;

    Json(HealthResponse {
        status: if data_ready { "healthy" } else { "degraded" }.to_string(),
        data_ready,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /progress
///
/// Always 200; the body tells whether the documents are in place.
pub async fn progress(State(state): State<Arc<AppState>>) -> Json<ProgressResponse> {
    Json(ProgressResponse::from_ready(check_documents(&state).await))
}

/// Dimensions and facts must both be present; status is optional
async fn check_documents(state: &AppState) -> bool {
    for relative in [DIMENSIONS_FILE, FACTS_FILE] {
        let path = state.static_dir().join(relative);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "Document missing");
            return false;
        }
    }
    true
}
