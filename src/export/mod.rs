//! Dashboard data export
//!
//! Turns raw registry publications into the documents the loader reads:
//!
//! ```text
//! publications.csv|json
//!        ↓ read_publications
//! [Publication]
//!        ↓ aggregate (canton filter, HR01/HR03 filter, NET)
//! MonthlyExport
//!        ↓ write_documents, write_status
//! <static>/data/shab_monthly.json
//! <static>/data/dimensions.json
//! <static>/status.json
//! ```
//!
//! An empty input writes nothing, so a failed upstream fetch never wipes
//! the documents of the previous refresh.

pub mod records;
pub mod transform;
pub mod writer;

pub use records::{parse_date, read_publications, Publication};
pub use transform::{
    aggregate, normalize_canton, registry_metric, DimensionsDocument, ExportDiagnostics,
    MonthlyExport, MonthlyFact, VALID_CANTONS,
};
pub use writer::{write_documents, write_json, write_status, RefreshStatus};

use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;
use thiserror::Error;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of one export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub diagnostics: ExportDiagnostics,
    pub rows_written: usize,
    pub months: usize,
    pub status: RefreshStatus,
}

/// Aggregate `publications` and write all three documents under `static_dir`
///
/// Returns `None` without touching the folder when there are no publications.
pub fn export_dashboard_data(
    publications: &[Publication],
    static_dir: &Path,
    now: DateTime<Utc>,
) -> Result<Option<ExportSummary>, ExportError> {
    if publications.is_empty() {
        tracing::warn!("No publications provided, skipping dashboard export");
        return Ok(None);
    }

    tracing::info!(publications = publications.len(), "Starting dashboard data export");

    let export = aggregate(publications);
    let diagnostics = export.diagnostics;
    if diagnostics.counted < diagnostics.publications {
        tracing::debug!(
            invalid_date = diagnostics.invalid_date,
            invalid_canton = diagnostics.invalid_canton,
            other_rubric = diagnostics.other_rubric,
            "Publications left out of the export"
        );
    }

    write_documents(static_dir, &export)?;

    let dates: Vec<NaiveDate> = publications.iter().filter_map(|p| p.parsed_date()).collect();
    let start = dates.iter().min().copied();
    let end = dates.iter().max().copied();

    let status = RefreshStatus::success(now, publications.len(), start, end);
    write_status(static_dir, &status)?;

    tracing::info!("Dashboard export completed");

    Ok(Some(ExportSummary {
        diagnostics,
        rows_written: export.facts.len(),
        months: export.dimensions.months.len(),
        status,
    }))
}
