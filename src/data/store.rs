//! Dimension and fact store
//!
//! Holds the month axis, the canton set and the raw fact rows for the
//! lifetime of a session. Everything here is immutable after loading.

use super::error::{DataError, DataResult};
use super::types::{CantonCode, Dimensions, MonthId, RawFact, StatusDocument};
use std::collections::HashMap;

/// Ordered month axis with O(1) position lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthAxis {
    months: Vec<MonthId>,
    positions: HashMap<MonthId, usize>,
}

impl MonthAxis {
    /// Build the axis from chronological month ids
    ///
    /// A repeated id resolves to its last position; the axis itself is kept as given.
    pub fn new(months: Vec<MonthId>) -> Self {
        let mut positions = HashMap::with_capacity(months.len());
        for (idx, month) in months.iter().enumerate() {
            positions.insert(month.clone(), idx);
        }

        if let Some(pair) = months.windows(2).find(|w| w[0] >= w[1]) {
            tracing::warn!(
                previous = %pair[0],
                next = %pair[1],
                "Month axis is not strictly increasing"
            );
        }

        Self { months, positions }
    }

    /// Exact-match position of a month
    pub fn position(&self, month: &str) -> Option<usize> {
        self.positions.get(month).copied()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[MonthId] {
        &self.months
    }

    pub fn first(&self) -> Option<&MonthId> {
        self.months.first()
    }

    pub fn last(&self) -> Option<&MonthId> {
        self.months.last()
    }
}

/// Canton codes in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CantonSet {
    codes: Vec<CantonCode>,
    positions: HashMap<CantonCode, usize>,
}

impl CantonSet {
    /// Build the set, dropping repeated codes after their first occurrence
    pub fn new(codes: Vec<CantonCode>) -> Self {
        let mut unique = Vec::with_capacity(codes.len());
        let mut positions = HashMap::with_capacity(codes.len());

        for code in codes {
            if !positions.contains_key(&code) {
                positions.insert(code.clone(), unique.len());
                unique.push(code);
            }
        }

        Self {
            codes: unique,
            positions,
        }
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    pub fn contains(&self, code: &CantonCode) -> bool {
        self.positions.contains_key(code)
    }

    pub fn codes(&self) -> &[CantonCode] {
        &self.codes
    }

    pub fn first(&self) -> Option<&CantonCode> {
        self.codes.first()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Everything loaded for one session
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub axis: MonthAxis,
    pub cantons: CantonSet,
    pub facts: Vec<RawFact>,
    pub status: Option<StatusDocument>,
}

impl DataSet {
    pub fn new(
        dimensions: Dimensions,
        facts: Vec<RawFact>,
        status: Option<StatusDocument>,
    ) -> Self {
        Self {
            axis: MonthAxis::new(dimensions.months),
            cantons: CantonSet::new(dimensions.cantons),
            facts,
            status,
        }
    }
}

/// Decode the dimensions document
pub fn parse_dimensions(bytes: &[u8]) -> DataResult<Dimensions> {
    serde_json::from_slice(bytes).map_err(|e| DataError::decode("dimensions", e))
}

/// Decode the facts document
pub fn parse_facts(bytes: &[u8]) -> DataResult<Vec<RawFact>> {
    serde_json::from_slice(bytes).map_err(|e| DataError::decode("facts", e))
}

/// Decode the status document
pub fn parse_status(bytes: &[u8]) -> DataResult<StatusDocument> {
    serde_json::from_slice(bytes).map_err(|e| DataError::decode("status", e))
}
