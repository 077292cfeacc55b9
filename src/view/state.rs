//! View state and its reducer
//!
//! The UI never mutates `ViewState` directly. Every control change and chart
//! click becomes a [`ViewEvent`], which is turned into a [`ViewStateDelta`]
//! and applied by [`ViewState::apply`]. Projection only ever reads the state.

use crate::data::{CantonCode, CantonSet, GeoScope, Metric};
use crate::index::RangeWidth;
use serde::{Deserialize, Serialize};

/// Geography mode of the dashboard; same two values as a fact's scope
pub type GeoMode = GeoScope;

/// Current dashboard selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub metric: Metric,
    pub geo_mode: GeoMode,
    /// Only read in cantonal mode; absent when the canton set is empty
    pub selected_canton: Option<CantonCode>,
    pub compare: bool,
    pub range: RangeWidth,
}

impl ViewState {
    /// Initial state for freshly loaded dimensions
    pub fn initial(cantons: &CantonSet, metric: Metric, range: RangeWidth) -> Self {
        Self {
            metric,
            geo_mode: GeoMode::National,
            selected_canton: cantons.first().cloned(),
            compare: false,
            range,
        }
    }

    /// Apply a delta in place
    pub fn apply(&mut self, delta: ViewStateDelta) {
        if let Some(metric) = delta.metric {
            self.metric = metric;
        }
        if let Some(geo_mode) = delta.geo_mode {
            self.geo_mode = geo_mode;
        }
        if let Some(canton) = delta.selected_canton {
            self.selected_canton = Some(canton);
        }
        if let Some(compare) = delta.compare {
            self.compare = compare;
        }
        if let Some(range) = delta.range {
            self.range = range;
        }
    }

    /// Reduce an event into a new state
    pub fn reduce(mut self, event: ViewEvent) -> Self {
        self.apply(event.into_delta());
        self
    }

    /// Label of the current geography (`Switzerland` or the canton code)
    pub fn geo_label(&self) -> String {
        match (self.geo_mode, &self.selected_canton) {
            (GeoMode::National, _) => "Switzerland".to_string(),
            (GeoMode::Cantonal, Some(canton)) => canton.to_string(),
            (GeoMode::Cantonal, None) => "-".to_string(),
        }
    }
}

/// Partial update to a `ViewState`; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewStateDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_mode: Option<GeoMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_canton: Option<CantonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeWidth>,
}

impl ViewStateDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Events emitted by the control surface and the charts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ViewEvent {
    SelectMetric(Metric),
    SetCompare(bool),
    SetGeoMode(GeoMode),
    SelectCanton(CantonCode),
    SetRange(RangeWidth),
    /// A heatmap cell was clicked; carries the row's canton
    HeatmapCellClicked(CantonCode),
}

impl ViewEvent {
    pub fn into_delta(self) -> ViewStateDelta {
        match self {
            ViewEvent::SelectMetric(metric) => ViewStateDelta {
                metric: Some(metric),
                ..Default::default()
            },
            ViewEvent::SetCompare(compare) => ViewStateDelta {
                compare: Some(compare),
                ..Default::default()
            },
            ViewEvent::SetGeoMode(geo_mode) => ViewStateDelta {
                geo_mode: Some(geo_mode),
                ..Default::default()
            },
            ViewEvent::SelectCanton(canton) => ViewStateDelta {
                selected_canton: Some(canton),
                ..Default::default()
            },
            ViewEvent::SetRange(range) => ViewStateDelta {
                range: Some(range),
                ..Default::default()
            },
            ViewEvent::HeatmapCellClicked(canton) => on_heatmap_cell_click(canton),
        }
    }
}

/// Drill down into the clicked canton
///
/// Independent of the prior state: always cantonal mode on `clicked`.
pub fn on_heatmap_cell_click(clicked: CantonCode) -> ViewStateDelta {
    ViewStateDelta {
        geo_mode: Some(GeoMode::Cantonal),
        selected_canton: Some(clicked),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cantons() -> CantonSet {
        CantonSet::new(vec!["AG".into(), "ZH".into()])
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::initial(&cantons(), Metric::Net, RangeWidth::Months(12));
        assert_eq!(state.metric, Metric::Net);
        assert_eq!(state.geo_mode, GeoMode::National);
        assert_eq!(state.selected_canton, Some(CantonCode::from("AG")));
        assert!(!state.compare);
        assert_eq!(state.range, RangeWidth::Months(12));

        let empty = ViewState::initial(&CantonSet::default(), Metric::Hr01, RangeWidth::All);
        assert_eq!(empty.selected_canton, None);
    }

    #[test]
    fn test_click_delta_ignores_prior_state() {
        let expected = ViewStateDelta {
            geo_mode: Some(GeoMode::Cantonal),
            selected_canton: Some(CantonCode::from("ZH")),
            ..Default::default()
        };
        assert_eq!(on_heatmap_cell_click("ZH".into()), expected);

        let priors = [
            ViewState::initial(&cantons(), Metric::Net, RangeWidth::Months(12)),
            ViewState {
                geo_mode: GeoMode::Cantonal,
                selected_canton: Some("ZH".into()),
                compare: true,
                ..ViewState::initial(&cantons(), Metric::Hr03, RangeWidth::All)
            },
        ];
        for prior in priors {
            let next = prior.clone().reduce(ViewEvent::HeatmapCellClicked("ZH".into()));
            assert_eq!(next.geo_mode, GeoMode::Cantonal);
            assert_eq!(next.selected_canton, Some(CantonCode::from("ZH")));
            assert_eq!(next.metric, prior.metric);
            assert_eq!(next.compare, prior.compare);
            assert_eq!(next.range, prior.range);
        }
    }

    #[test]
    fn test_control_events() {
        let state = ViewState::initial(&cantons(), Metric::Net, RangeWidth::Months(12))
            .reduce(ViewEvent::SelectMetric(Metric::Hr03))
            .reduce(ViewEvent::SetCompare(true))
            .reduce(ViewEvent::SetGeoMode(GeoMode::Cantonal))
            .reduce(ViewEvent::SelectCanton("ZH".into()))
            .reduce(ViewEvent::SetRange(RangeWidth::All));

        assert_eq!(state.metric, Metric::Hr03);
        assert!(state.compare);
        assert_eq!(state.geo_mode, GeoMode::Cantonal);
        assert_eq!(state.selected_canton, Some(CantonCode::from("ZH")));
        assert_eq!(state.range, RangeWidth::All);
    }

    #[test]
    fn test_empty_delta_is_noop() {
        let delta = ViewStateDelta::default();
        assert!(delta.is_empty());

        let mut state = ViewState::initial(&cantons(), Metric::Net, RangeWidth::Months(6));
        let before = state.clone();
        state.apply(delta);
        assert_eq!(state, before);
    }

    #[test]
    fn test_geo_label() {
        let mut state = ViewState::initial(&cantons(), Metric::Net, RangeWidth::Months(6));
        assert_eq!(state.geo_label(), "Switzerland");
        state.geo_mode = GeoMode::Cantonal;
        assert_eq!(state.geo_label(), "AG");
    }

    #[test]
    fn test_event_json() {
        let event: ViewEvent =
            serde_json::from_str(r#"{"type": "heatmap_cell_clicked", "value": "BE"}"#).unwrap();
        assert_eq!(event, ViewEvent::HeatmapCellClicked("BE".into()));

        let event: ViewEvent =
            serde_json::from_str(r#"{"type": "set_range", "value": "all"}"#).unwrap();
        assert_eq!(event, ViewEvent::SetRange(RangeWidth::All));

        let event: ViewEvent =
            serde_json::from_str(r#"{"type": "select_metric", "value": "HR01"}"#).unwrap();
        assert_eq!(event, ViewEvent::SelectMetric(Metric::Hr01));
    }
}
