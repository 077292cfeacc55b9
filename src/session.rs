//! Dashboard session
//!
//! The session is the explicit context object of one dashboard lifetime: it
//! owns the loaded data, the dense indices and the current view state.
//! Reloading data means building a new session.
//!
//! # Example
//!
//! ```rust,no_run
//! use hrstat::config::ViewConfig;
//! use hrstat::loader::FsSource;
//! use hrstat::session::DashboardSession;
//! use hrstat::view::ViewEvent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FsSource::new("./static");
//!     let mut session = DashboardSession::initialize(&source, &ViewConfig::default()).await?;
//!
//!     let frame = session.render();
//!     println!("{}", frame.time_series.title);
//!
//!     // A click on the heatmap drills into the canton
//!     let frame = session.dispatch(ViewEvent::HeatmapCellClicked("ZH".into()));
//!     println!("{}", frame.time_series.title);
//!
//!     Ok(())
//! }
//! ```

use crate::config::ViewConfig;
use crate::data::{DataSet, MonthId};
use crate::index::{build, BuildDiagnostics, IndexSet, RangeWidth};
use crate::loader::{load_data_set, DocumentSource, LoadError};
use crate::view::{project, RenderFrame, ViewEvent, ViewState};

/// One dashboard lifetime: data, indices and view state
#[derive(Debug, Clone)]
pub struct DashboardSession {
    data: DataSet,
    index: IndexSet,
    view: ViewState,
    range_choices: Vec<RangeWidth>,
}

impl DashboardSession {
    /// Load all documents from `source` and build the session
    ///
    /// Indices are complete before this returns, so the first render never
    /// sees partial data.
    pub async fn initialize(
        source: &dyn DocumentSource,
        view_config: &ViewConfig,
    ) -> Result<Self, LoadError> {
        let data = load_data_set(source).await?;
        Ok(Self::from_data(data, view_config))
    }

    /// Build a session from already-loaded data
    pub fn from_data(data: DataSet, view_config: &ViewConfig) -> Self {
        let index = build(&data.axis, &data.cantons, &data.facts);
        let view = ViewState::initial(
            &data.cantons,
            view_config.default_metric,
            view_config.default_range,
        );

        tracing::info!(
            months = data.axis.len(),
            cantons = data.cantons.len(),
            "Session ready: {}",
            index.diagnostics
        );

        Self {
            data,
            index,
            view,
            range_choices: view_config.range_choices(),
        }
    }

    /// Project both charts for the current state
    pub fn render(&self) -> RenderFrame {
        project(&self.view, &self.index, self.months())
    }

    /// Apply an event and re-project both charts
    pub fn dispatch(&mut self, event: ViewEvent) -> RenderFrame {
        tracing::debug!(?event, "View event");
        self.view.apply(event.into_delta());
        self.render()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn index(&self) -> &IndexSet {
        &self.index
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn months(&self) -> &[MonthId] {
        self.data.axis.months()
    }

    pub fn diagnostics(&self) -> &BuildDiagnostics {
        &self.index.diagnostics
    }

    /// Options for the range control
    pub fn range_choices(&self) -> &[RangeWidth] {
        &self.range_choices
    }

    /// Status line shown once the session is ready
    pub fn status_line(&self) -> String {
        match self.data.status.as_ref().and_then(|s| s.updated_at()) {
            Some(ts) => format!("Last updated: {}", ts.format("%Y-%m-%d %H:%M UTC")),
            None => "Ready".to_string(),
        }
    }
}
