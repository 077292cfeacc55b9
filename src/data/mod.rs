//! Dimension and fact data
//!
//! - **types**: identifiers, metric/scope enumerations and document shapes
//! - **store**: the month axis, canton set and loaded data set
//! - **error**: error types for document decoding
//!
//! # Documents
//!
//! ```text
//! dimensions.json    { "months": ["2023-01-01", ...], "cantons": ["AG", ...] }
//! shab_monthly.json  [ { "month", "geo": "CH"|"KT", "kanton"?, "hr", "count" }, ... ]
//! status.json        { "data_version"?, "data_updated_at"? }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{DataError, DataResult};
pub use store::{parse_dimensions, parse_facts, parse_status, CantonSet, DataSet, MonthAxis};
pub use types::{
    CantonCode, Count, DataVersion, Dimensions, GeoScope, Metric, MonthId, RawFact, StatusDocument,
};
