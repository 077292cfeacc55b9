//! Range Selector
//!
//! Maps a requested window width onto the month axis. The window always
//! ends at the newest month:
//!
//! ```text
//! axis:      [m0 m1 m2 m3 m4 m5]
//! width 4:          [m2 m3 m4 m5]   start_offset = 2
//! width all: [m0 m1 m2 m3 m4 m5]    start_offset = 0
//! ```

use crate::data::MonthId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the visible window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeWidth {
    /// Last N months
    Months(u32),
    /// The whole axis
    All,
}

impl RangeWidth {
    /// Requested number of months, `usize::MAX` for `All`
    pub fn requested(self) -> usize {
        match self {
            RangeWidth::Months(n) => n as usize,
            RangeWidth::All => usize::MAX,
        }
    }

    pub fn label(self) -> String {
        match self {
            RangeWidth::Months(n) if n % 12 == 0 && n > 0 => format!("{}y", n / 12),
            RangeWidth::Months(n) => format!("{}m", n),
            RangeWidth::All => "All".to_string(),
        }
    }
}

impl Default for RangeWidth {
    fn default() -> Self {
        RangeWidth::Months(12)
    }
}

impl fmt::Display for RangeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeWidth::Months(n) => write!(f, "{}", n),
            RangeWidth::All => f.write_str("all"),
        }
    }
}

impl FromStr for RangeWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(RangeWidth::All);
        }
        s.parse::<u32>()
            .map(RangeWidth::Months)
            .map_err(|_| format!("invalid range '{}' (expected a month count or 'all')", s))
    }
}

impl Serialize for RangeWidth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RangeWidth::Months(n) => serializer.serialize_u32(*n),
            RangeWidth::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for RangeWidth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Months(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Months(n) => Ok(RangeWidth::Months(n)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// `(start, count)` of the visible window on an axis of `total` months
pub fn effective_range(total: usize, requested: usize) -> (usize, usize) {
    let count = total.min(requested);
    (total - count, count)
}

/// Visible suffix of the axis plus its offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection<'a> {
    pub start_offset: usize,
    pub visible: &'a [MonthId],
}

impl<'a> RangeSelection<'a> {
    /// First and last visible month, if any
    pub fn bounds(&self) -> Option<(&'a MonthId, &'a MonthId)> {
        Some((self.visible.first()?, self.visible.last()?))
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Slice a month-aligned series down to the visible window
    pub fn slice<'s>(&self, series: &'s [i64]) -> &'s [i64] {
        let start = self.start_offset.min(series.len());
        let end = (self.start_offset + self.visible.len()).min(series.len());
        &series[start..end]
    }
}

/// Apply a width to the full month axis
pub fn select_range(months: &[MonthId], width: RangeWidth) -> RangeSelection<'_> {
    let (start_offset, _) = effective_range(months.len(), width.requested());
    RangeSelection {
        start_offset,
        visible: &months[start_offset..],
    }
}
