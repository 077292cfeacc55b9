//! Writing the dashboard documents into the static folder
//!
//! Each file is written next to its target and renamed into place, so the
//! server never hands out a half-written document.

use super::transform::MonthlyExport;
use super::ExportError;
use crate::loader::{DIMENSIONS_FILE, FACTS_FILE, STATUS_FILE};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::Path;

/// The status document written after a successful export
///
/// A superset of what the loader reads; the extra fields are for operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshStatus {
    pub last_refresh: String,
    pub data_updated_at: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Publications read, before filtering
    pub records: usize,
    pub status: String,
    pub data_files: Vec<String>,
    /// Unix seconds of the refresh; used for cache busting
    pub data_version: i64,
}

impl RefreshStatus {
    pub fn success(
        now: DateTime<Utc>,
        records: usize,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        let stamp = now.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        Self {
            last_refresh: stamp.clone(),
            data_updated_at: stamp,
            start_date,
            end_date,
            records,
            status: "success".to_string(),
            data_files: [FACTS_FILE, DIMENSIONS_FILE]
                .iter()
                .filter_map(|f| Path::new(f).file_name())
                .map(|f| f.to_string_lossy().into_owned())
                .collect(),
            data_version: now.timestamp(),
        }
    }
}

/// Serialize `value` to `static_dir/relative`, replacing any previous file
pub fn write_json<T: Serialize>(
    static_dir: &Path,
    relative: &str,
    value: &T,
    pretty: bool,
) -> Result<(), ExportError> {
    let path = static_dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, &path)?;

    tracing::debug!(path = %path.display(), "Written");
    Ok(())
}

/// Write the facts and dimensions documents
pub fn write_documents(static_dir: &Path, export: &MonthlyExport) -> Result<(), ExportError> {
    write_json(static_dir, FACTS_FILE, &export.facts, false)?;
    tracing::info!("Written {} rows to {}", export.facts.len(), FACTS_FILE);

    write_json(static_dir, DIMENSIONS_FILE, &export.dimensions, true)?;
    tracing::info!(
        months = export.dimensions.months.len(),
        "Written dimensions to {}",
        DIMENSIONS_FILE
    );
    Ok(())
}

/// Write the status document last, after the data it describes
pub fn write_status(static_dir: &Path, status: &RefreshStatus) -> Result<(), ExportError> {
    write_json(static_dir, STATUS_FILE, status, false)
}
