//! Data Transfer Objects
//!
//! Response types for the server endpoints.

use serde::Serialize;

/// Body returned when the status document has not been generated yet
#[derive(Debug, Serialize)]
pub struct MissingStatusResponse {
    /// Always "missing"
    pub state: String,
    /// Hint for the operator
    pub message: String,
}

impl MissingStatusResponse {
    pub fn new() -> Self {
        Self {
            state: "missing".to_string(),
            message: "status.json not found. Run the data refresh.".to_string(),
        }
    }
}

impl Default for MissingStatusResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Whether both dashboard documents are present
    pub data_ready: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

/// Refresh progress as polled by the dashboard page
///
/// The export is a single step, so progress is either 0 or 1 of 1.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    /// "complete" or "missing"
    pub status: String,
    pub message: String,
    pub current: u32,
    pub total: u32,
}

impl ProgressResponse {
    pub fn from_ready(ready: bool) -> Self {
        if ready {
            Self {
                status: "complete".to_string(),
                message: "Ready".to_string(),
                current: 1,
                total: 1,
            }
        } else {
            Self {
                status: "missing".to_string(),
                message: "Run the data refresh".to_string(),
                current: 0,
                total: 1,
            }
        }
    }
}
