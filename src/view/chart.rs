//! Chart specifications handed to the renderer
//!
//! Specs are complete descriptions: the renderer replaces the current chart
//! with each new chart instead of patching it.

use crate::data::{CantonCode, Metric, MonthId};
use serde::Serialize;
use std::fmt;

/// Identity tag the renderer uses to decide whether to keep user zoom/pan
///
/// Equal revisions mean "same view"; a new revision re-homes the chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the time-series chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub metric: Metric,
    pub name: String,
    /// Aligned to the full month axis
    pub values: Vec<i64>,
}

/// Initial visible window of the time-series x axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRange {
    pub start: MonthId,
    pub end: MonthId,
}

/// Time-series chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesSpec {
    pub title: String,
    /// Full month axis
    pub months: Vec<MonthId>,
    pub series: Vec<Series>,
    /// `None` when the window is empty
    pub display_range: Option<DisplayRange>,
    pub revision: Revision,
}

impl TimeSeriesSpec {
    /// Metrics present, in series order
    pub fn metrics(&self) -> Vec<Metric> {
        self.series.iter().map(|s| s.metric).collect()
    }
}

/// One heatmap row: a canton over the visible window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub canton: CantonCode,
    pub values: Vec<i64>,
    /// Sum of `values`; the sort key
    pub total: i64,
}

/// Minimum and maximum over all visible cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValueBounds {
    pub min: i64,
    pub max: i64,
}

impl ValueBounds {
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Which side of the scale a value falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Growth,
    Decline,
    Neutral,
}

/// Color-scale policy
///
/// The concrete palette belongs to the renderer. For the diverging scale the
/// contract is: centered at `midpoint`, values above it use the growth color
/// and values below it the decline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorScale {
    /// Single hue, low to high
    Sequential,
    /// Two hues around a fixed midpoint
    Diverging {
        midpoint: i64,
        above: Tone,
        below: Tone,
    },
}

impl ColorScale {
    /// Diverging scale used for NET: growth above zero, decline below
    pub fn net_change() -> Self {
        ColorScale::Diverging {
            midpoint: 0,
            above: Tone::Growth,
            below: Tone::Decline,
        }
    }

    /// Tone of a single value; sequential scales have no sides
    pub fn tone(&self, value: i64) -> Tone {
        match *self {
            ColorScale::Sequential => Tone::Neutral,
            ColorScale::Diverging {
                midpoint,
                above,
                below,
            } => match value.cmp(&midpoint) {
                std::cmp::Ordering::Greater => above,
                std::cmp::Ordering::Less => below,
                std::cmp::Ordering::Equal => Tone::Neutral,
            },
        }
    }
}

/// Canton x month heatmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapSpec {
    pub title: String,
    pub metric: Metric,
    /// Visible months only
    pub months: Vec<MonthId>,
    /// Sorted by descending total
    pub rows: Vec<HeatmapRow>,
    pub bounds: ValueBounds,
    pub color_scale: ColorScale,
    pub revision: Revision,
}

impl HeatmapSpec {
    /// Canton of a row, for mapping a click back to a canton
    pub fn canton_at(&self, row: usize) -> Option<&CantonCode> {
        self.rows.get(row).map(|r| &r.canton)
    }
}

/// Both chart specs for one state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFrame {
    pub time_series: TimeSeriesSpec,
    pub heatmap: HeatmapSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_change_tones() {
        let scale = ColorScale::net_change();
        assert_eq!(scale.tone(5), Tone::Growth);
        assert_eq!(scale.tone(-3), Tone::Decline);
        assert_eq!(scale.tone(0), Tone::Neutral);
        assert_eq!(ColorScale::Sequential.tone(5), Tone::Neutral);
    }

    #[test]
    fn test_color_scale_json() {
        let json = serde_json::to_value(ColorScale::net_change()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "diverging",
                "midpoint": 0,
                "above": "growth",
                "below": "decline"
            })
        );
        let json = serde_json::to_value(ColorScale::Sequential).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "sequential"}));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = ValueBounds { min: -2, max: 7 };
        assert!(bounds.contains(-2));
        assert!(bounds.contains(7));
        assert!(!bounds.contains(8));
    }
}
