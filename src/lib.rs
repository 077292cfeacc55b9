//! # hrstat
//!
//! Dashboard core for the monthly Swiss commercial-registry statistics:
//! new registrations (HR01), deletions (HR03) and their difference (NET),
//! nationally and per canton.
//!
//! ## Modules
//!
//! - [`data`]: document shapes, month axis and canton set
//! - [`index`]: dense month-aligned indices and the range selector
//! - [`view`]: view state, event reducer and chart projection
//! - [`loader`]: fetching documents over HTTP or from disk
//! - [`session`]: one dashboard lifetime tying the above together
//! - [`export`]: publications to the documents the loader reads
//! - [`api`]: static data server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use hrstat::config::ViewConfig;
//! use hrstat::data::{CantonCode, DataSet, Dimensions, Metric, MonthId, RawFact};
//! use hrstat::session::DashboardSession;
//! use hrstat::view::ViewEvent;
//!
//! let data = DataSet::new(
//!     Dimensions {
//!         months: vec![MonthId::from("2023-01-01"), MonthId::from("2023-02-01")],
//!         cantons: vec![CantonCode::from("ZH")],
//!     },
//!     vec![RawFact::cantonal("2023-02-01", "ZH", Metric::Net, 4)],
//!     None,
//! );
//!
//! let mut session = DashboardSession::from_data(data, &ViewConfig::default());
//! let frame = session.dispatch(ViewEvent::HeatmapCellClicked("ZH".into()));
//!
//! assert_eq!(frame.time_series.title, "Monthly NET (ZH)");
//! assert_eq!(frame.time_series.series[0].values, vec![0, 4]);
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod export;
pub mod index;
pub mod loader;
pub mod logging;
pub mod session;
pub mod view;

// Re-export top-level types for convenience
pub use data::{CantonCode, DataError, DataSet, GeoScope, Metric, MonthId, RawFact};

pub use index::{build, BuildDiagnostics, IndexSet, RangeWidth};

pub use view::{project, HeatmapSpec, RenderFrame, TimeSeriesSpec, ViewEvent, ViewState};

pub use loader::{DocumentSource, FsSource, HttpSource, LoadError};

pub use session::DashboardSession;

pub use export::{export_dashboard_data, ExportError, Publication};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, SourceConfig, ViewConfig};
