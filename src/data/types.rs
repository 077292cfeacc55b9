//! Core data types for the registry dashboard
//!
//! This module defines the fundamental vocabulary shared by every layer:
//! - `MonthId` / `CantonCode`: identifiers on the two dashboard axes
//! - `Metric` and `GeoScope`: the fixed enumerations of the fact table
//! - `RawFact`: one lenient row of the facts document, with its `Count`
//! - `Dimensions` and `StatusDocument`: the two metadata documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar month key as published upstream (e.g. `2023-01-01`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthId(String);

impl MonthId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for MonthId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MonthId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Two-letter canton abbreviation (e.g. `ZH`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CantonCode(String);

impl CantonCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CantonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for CantonCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CantonCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Registry metric shown on the dashboard
///
/// `Net` is stored upstream like the other two and is never recomputed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// New registrations
    #[serde(rename = "HR01")]
    Hr01,
    /// Deletions
    #[serde(rename = "HR03")]
    Hr03,
    /// Net change as published
    #[serde(rename = "NET")]
    Net,
}

impl Metric {
    pub const COUNT: usize = 3;

    /// All metrics in table order
    pub fn all() -> &'static [Metric] {
        &[Metric::Hr01, Metric::Hr03, Metric::Net]
    }

    /// Slot of this metric in a `MetricTable`
    pub fn slot(self) -> usize {
        match self {
            Metric::Hr01 => 0,
            Metric::Hr03 => 1,
            Metric::Net => 2,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Metric::Hr01 => "HR01",
            Metric::Hr03 => "HR03",
            Metric::Net => "NET",
        }
    }

    /// Parse the upstream code; unknown codes yield `None`
    pub fn parse(code: &str) -> Option<Metric> {
        match code {
            "HR01" => Some(Metric::Hr01),
            "HR03" => Some(Metric::Hr03),
            "NET" => Some(Metric::Net),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::parse(&s.to_ascii_uppercase())
            .ok_or_else(|| format!("unknown metric '{}' (expected HR01, HR03 or NET)", s))
    }
}

/// Geography scope of a fact row, and the geography mode of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoScope {
    /// Switzerland as a whole (`CH`)
    #[serde(rename = "CH")]
    National,
    /// A single canton (`KT`)
    #[serde(rename = "KT")]
    Cantonal,
}

impl GeoScope {
    pub fn code(self) -> &'static str {
        match self {
            GeoScope::National => "CH",
            GeoScope::Cantonal => "KT",
        }
    }

    pub fn parse(code: &str) -> Option<GeoScope> {
        match code {
            "CH" => Some(GeoScope::National),
            "KT" => Some(GeoScope::Cantonal),
            _ => None,
        }
    }
}

impl fmt::Display for GeoScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for GeoScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ch" | "national" => Ok(GeoScope::National),
            "kt" | "cantonal" | "canton" => Ok(GeoScope::Cantonal),
            _ => Err(format!("unknown geography '{}' (expected CH or KT)", s)),
        }
    }
}

/// One row of the facts document, as loose as the upstream export
///
/// Every field is optional so a single bad row never rejects the document;
/// the index builder decides which rows are usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub geo: Option<String>,
    #[serde(default)]
    pub kanton: Option<String>,
    #[serde(default)]
    pub hr: Option<String>,
    #[serde(default)]
    pub count: Option<Count>,
}

/// A count as written in JSON
///
/// Integers are kept exact. Upstream pivots can emit `5.0` instead of `5`,
/// so floats are accepted when they hold an integral value in `i64` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Int(i64),
    Float(f64),
}

// 2^63; `i64::MAX as f64` rounds up to this value
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

impl Count {
    /// Exact integral value, if there is one
    pub fn integral(self) -> Option<i64> {
        match self {
            Count::Int(n) => Some(n),
            Count::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v >= -I64_UPPER && v < I64_UPPER {
                    Some(v as i64)
                } else {
                    None
                }
            }
        }
    }
}

impl From<i64> for Count {
    fn from(n: i64) -> Self {
        Count::Int(n)
    }
}

impl RawFact {
    /// National fact row
    pub fn national(month: &str, metric: Metric, count: i64) -> Self {
        Self {
            month: Some(month.to_string()),
            geo: Some(GeoScope::National.code().to_string()),
            kanton: None,
            hr: Some(metric.code().to_string()),
            count: Some(Count::Int(count)),
        }
    }

    /// Cantonal fact row
    pub fn cantonal(month: &str, canton: &str, metric: Metric, count: i64) -> Self {
        Self {
            month: Some(month.to_string()),
            geo: Some(GeoScope::Cantonal.code().to_string()),
            kanton: Some(canton.to_string()),
            hr: Some(metric.code().to_string()),
            count: Some(Count::Int(count)),
        }
    }

    /// Integral count, if the row carries one
    pub fn integral_count(&self) -> Option<i64> {
        self.count?.integral()
    }
}

/// The dimensions document: month axis and canton set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Chronological month axis
    #[serde(default)]
    pub months: Vec<MonthId>,
    /// Canton codes in enumeration order
    #[serde(default)]
    pub cantons: Vec<CantonCode>,
}

/// Data version used for cache busting; upstream writes either a string or a timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataVersion {
    Text(String),
    Number(i64),
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataVersion::Text(s) => f.write_str(s),
            DataVersion::Number(n) => write!(f, "{}", n),
        }
    }
}

/// The optional status document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
    #[serde(default)]
    pub data_version: Option<DataVersion>,
    /// Kept as text; upstream writes local timestamps without an offset
    #[serde(default)]
    pub data_updated_at: Option<String>,
}

impl StatusDocument {
    /// Parse `data_updated_at` leniently (RFC 3339 or naive ISO 8601 treated as UTC)
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.data_updated_at.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
