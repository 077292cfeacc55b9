//! Publication records
//!
//! Input of the export: one row per registry publication. Only three columns
//! matter; everything else in the file is ignored. CSV files need a header
//! row, anything else is read as a JSON array of objects.

use super::ExportError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;

/// One publication, as loose as the upstream feed
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Publication {
    /// Publication date, usually `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Canton abbreviation, any case, possibly padded
    #[serde(default)]
    pub kanton: Option<String>,
    /// Registry sub-rubric such as `HR01`
    #[serde(default)]
    pub subrubric: Option<String>,
}

impl Publication {
    pub fn new(date: &str, kanton: &str, subrubric: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            kanton: Some(kanton.to_string()),
            subrubric: Some(subrubric.to_string()),
        }
    }

    /// Calendar date of the publication, if it parses
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(self.date.as_deref()?.trim())
    }
}

/// Lenient date parsing; unparseable dates yield `None`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Read publications from a CSV file or JSON array
pub fn read_publications(path: &Path) -> Result<Vec<Publication>, ExportError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        read_csv(reader)
    } else {
        let content = std::fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }
}

fn read_csv<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<Publication>, ExportError> {
    let mut publications = Vec::new();
    for (line_num, result) in reader.deserialize::<Publication>().enumerate() {
        match result {
            Ok(publication) => publications.push(publication),
            Err(e) => {
                // Header is line 1
                tracing::debug!(line = line_num + 2, "Skipping publication row: {}", e);
            }
        }
    }
    Ok(publications)
}
