//! Status Route
//!
//! - GET /api/status - The refresh status document
//!
//! The document is written by the data refresh next to the data files. It is
//! passed through as-is so extra fields survive.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::MissingStatusResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::loader::STATUS_FILE;

/// GET /api/status
///
/// 404 with `{"state": "missing", ...}` when no refresh has run yet.
pub async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let path = state.static_dir().join(STATUS_FILE);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Status document missing");
            return Ok((StatusCode::NOT_FOUND, Json(MissingStatusResponse::new())).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let document: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::InvalidDocument(format!("{}: {}", STATUS_FILE, e)))?;

    Ok(Json(document).into_response())
}
