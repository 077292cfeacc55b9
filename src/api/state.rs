//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for sharing across async tasks; never mutated.

use crate::config::ServerConfig;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Folder holding status.json and data/*.json
    pub static_dir: PathBuf,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
            start_time: Instant::now(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.static_dir)
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
