//! Index Builder - dense month-aligned tables
//!
//! Turns the sparse fact rows into two lookup structures whose columns line
//! up with the month axis:
//!
//! ```text
//! NationalIndex:  metric → [v0, v1, ..., vN-1]
//! CantonalIndex:  canton → metric → [v0, v1, ..., vN-1]
//! ```
//!
//! Unseen (month, geography) combinations stay 0. A repeated key overwrites
//! the earlier value. Rows that cannot be placed are dropped and only
//! counted in [`BuildDiagnostics`].

use crate::data::{CantonCode, CantonSet, GeoScope, Metric, MonthAxis, RawFact};
use serde::Serialize;
use std::fmt;

/// One value sequence per metric, all of the same length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTable {
    values: [Vec<i64>; Metric::COUNT],
}

impl MetricTable {
    /// Zero-filled table with `len` columns
    pub fn zeroed(len: usize) -> Self {
        Self {
            values: [vec![0; len], vec![0; len], vec![0; len]],
        }
    }

    /// Values for a metric, aligned to the month axis
    pub fn get(&self, metric: Metric) -> &[i64] {
        &self.values[metric.slot()]
    }

    fn set(&mut self, metric: Metric, position: usize, value: i64) {
        self.values[metric.slot()][position] = value;
    }

    /// Number of month columns
    pub fn len(&self) -> usize {
        self.values[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Switzerland-wide values per metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalIndex {
    table: MetricTable,
}

impl NationalIndex {
    pub fn series(&self, metric: Metric) -> &[i64] {
        self.table.get(metric)
    }

    pub fn table(&self) -> &MetricTable {
        &self.table
    }
}

/// Per-canton values per metric, cantons in enumeration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CantonalIndex {
    cantons: CantonSet,
    tables: Vec<MetricTable>,
    month_count: usize,
}

impl CantonalIndex {
    /// Series for one canton, `None` if the canton is not indexed
    pub fn series(&self, canton: &str, metric: Metric) -> Option<&[i64]> {
        let idx = self.cantons.position(canton)?;
        Some(self.tables[idx].get(metric))
    }

    /// Iterate cantons with their tables in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&CantonCode, &MetricTable)> {
        self.cantons.codes().iter().zip(self.tables.iter())
    }

    pub fn cantons(&self) -> &[CantonCode] {
        self.cantons.codes()
    }

    pub fn canton_count(&self) -> usize {
        self.tables.len()
    }

    pub fn month_count(&self) -> usize {
        self.month_count
    }
}

/// Why a fact row could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingMonth,
    UnknownMonth,
    UnknownScope,
    MissingCanton,
    UnknownCanton,
    UnknownMetric,
    InvalidCount,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::MissingMonth => "missing month",
            DropReason::UnknownMonth => "month not on axis",
            DropReason::UnknownScope => "unknown geography",
            DropReason::MissingCanton => "cantonal row without canton",
            DropReason::UnknownCanton => "unknown canton",
            DropReason::UnknownMetric => "unknown metric",
            DropReason::InvalidCount => "missing or non-integral count",
        };
        f.write_str(text)
    }
}

/// Counts of placed and dropped rows
///
/// Purely observational: dropping never fails a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    pub rows_seen: usize,
    pub rows_placed: usize,
    pub missing_month: usize,
    pub unknown_month: usize,
    pub unknown_scope: usize,
    pub missing_canton: usize,
    pub unknown_canton: usize,
    pub unknown_metric: usize,
    pub invalid_count: usize,
}

impl BuildDiagnostics {
    fn record(&mut self, reason: DropReason) {
        let counter = match reason {
            DropReason::MissingMonth => &mut self.missing_month,
            DropReason::UnknownMonth => &mut self.unknown_month,
            DropReason::UnknownScope => &mut self.unknown_scope,
            DropReason::MissingCanton => &mut self.missing_canton,
            DropReason::UnknownCanton => &mut self.unknown_canton,
            DropReason::UnknownMetric => &mut self.unknown_metric,
            DropReason::InvalidCount => &mut self.invalid_count,
        };
        *counter += 1;
    }

    /// Total rows dropped for any reason
    pub fn rows_dropped(&self) -> usize {
        self.rows_seen - self.rows_placed
    }
}

impl fmt::Display for BuildDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} placed, {} dropped",
            self.rows_seen,
            self.rows_placed,
            self.rows_dropped()
        )
    }
}

/// Output of one build: both indices plus diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSet {
    pub national: NationalIndex,
    pub cantonal: CantonalIndex,
    pub diagnostics: BuildDiagnostics,
}

/// Where a row lands
struct Placement {
    canton: Option<usize>,
    metric: Metric,
    position: usize,
    count: i64,
}

fn classify(row: &RawFact, axis: &MonthAxis, cantons: &CantonSet) -> Result<Placement, DropReason> {
    let month = row.month.as_deref().ok_or(DropReason::MissingMonth)?;
    let position = axis.position(month).ok_or(DropReason::UnknownMonth)?;

    let scope = row
        .geo
        .as_deref()
        .and_then(GeoScope::parse)
        .ok_or(DropReason::UnknownScope)?;

    let canton = match scope {
        GeoScope::National => None,
        GeoScope::Cantonal => {
            let code = row
                .kanton
                .as_deref()
                .filter(|c| !c.is_empty())
                .ok_or(DropReason::MissingCanton)?;
            Some(cantons.position(code).ok_or(DropReason::UnknownCanton)?)
        }
    };

    let metric = row
        .hr
        .as_deref()
        .and_then(Metric::parse)
        .ok_or(DropReason::UnknownMetric)?;

    let count = row.integral_count().ok_or(DropReason::InvalidCount)?;

    Ok(Placement {
        canton,
        metric,
        position,
        count,
    })
}

/// Build both indices from the loaded dimensions and facts
///
/// Total: every row is either placed or counted as dropped. Building twice
/// from the same inputs yields identical tables.
pub fn build(axis: &MonthAxis, cantons: &CantonSet, facts: &[RawFact]) -> IndexSet {
    let month_count = axis.len();
    let mut national = MetricTable::zeroed(month_count);
    let mut tables = vec![MetricTable::zeroed(month_count); cantons.len()];
    let mut diagnostics = BuildDiagnostics {
        rows_seen: facts.len(),
        ..Default::default()
    };

    for row in facts {
        match classify(row, axis, cantons) {
            Ok(placement) => {
                let table = match placement.canton {
                    Some(idx) => &mut tables[idx],
                    None => &mut national,
                };
                table.set(placement.metric, placement.position, placement.count);
                diagnostics.rows_placed += 1;
            }
            Err(reason) => {
                tracing::trace!(?row, %reason, "Dropping fact row");
                diagnostics.record(reason);
            }
        }
    }

    if diagnostics.rows_dropped() > 0 {
        tracing::debug!(
            unknown_month = diagnostics.unknown_month,
            unknown_canton = diagnostics.unknown_canton,
            unknown_metric = diagnostics.unknown_metric,
            "Index build dropped rows: {}",
            diagnostics
        );
    }

    IndexSet {
        national: NationalIndex { table: national },
        cantonal: CantonalIndex {
            cantons: cantons.clone(),
            tables,
            month_count,
        },
        diagnostics,
    }
}
