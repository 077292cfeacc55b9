//! View projection
//!
//! Deterministic projection of a [`ViewState`] over the dense indices into
//! chart specs, plus the reducer that handles control and click events.
//!
//! ```text
//! ViewEvent ──▶ ViewStateDelta ──▶ ViewState
//!                                     │
//!             IndexSet + month axis ──┤
//!                                     ▼
//!                 TimeSeriesSpec + HeatmapSpec ──▶ renderer
//!                                                     │
//!             HeatmapCellClicked(canton) ◀────────────┘
//! ```

pub mod chart;
pub mod heatmap;
pub mod state;
pub mod timeseries;

pub use chart::{
    ColorScale, DisplayRange, HeatmapRow, HeatmapSpec, RenderFrame, Revision, Series,
    TimeSeriesSpec, Tone, ValueBounds,
};
pub use heatmap::{color_scale_for, heatmap_revision, project_heatmap, project_heatmap_window};
pub use state::{on_heatmap_cell_click, GeoMode, ViewEvent, ViewState, ViewStateDelta};
pub use timeseries::{plotted_metrics, project_time_series, time_series_revision};

use crate::data::MonthId;
use crate::index::IndexSet;

/// Project both charts for a state
pub fn project(view: &ViewState, index: &IndexSet, months: &[MonthId]) -> RenderFrame {
    RenderFrame {
        time_series: project_time_series(view, &index.national, &index.cantonal, months),
        heatmap: project_heatmap(view, &index.cantonal, months),
    }
}
