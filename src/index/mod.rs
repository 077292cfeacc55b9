//! Dense month-aligned indices
//!
//! - **builder**: sparse fact rows → `NationalIndex` + `CantonalIndex`
//! - **range**: the visible window over the month axis
//!
//! # Architecture
//!
//! ```text
//! facts: (2023-02, CH, HR01, 5)
//!        ↓
//! axis:  [2023-01, 2023-02, 2023-03]
//!        ↓
//! NationalIndex[HR01] = [0, 5, 0]
//!        ↓
//! RangeSelection(width 2) → offset 1, [2023-02, 2023-03]
//! ```

pub mod builder;
pub mod range;

pub use builder::{
    build, BuildDiagnostics, CantonalIndex, DropReason, IndexSet, MetricTable, NationalIndex,
};
pub use range::{effective_range, select_range, RangeSelection, RangeWidth};
