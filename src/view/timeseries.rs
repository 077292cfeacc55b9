//! Time-series projection
//!
//! Series always span the whole month axis so a zoom/pan control can reach
//! data outside the sidebar window; the window itself travels as the
//! display-range hint.

use super::chart::{DisplayRange, Revision, Series, TimeSeriesSpec};
use super::state::{GeoMode, ViewState};
use crate::data::{Metric, MonthId};
use crate::index::{select_range, CantonalIndex, NationalIndex};

/// Metrics drawn for a state: compare mode overrides the metric selector
pub fn plotted_metrics(view: &ViewState) -> Vec<Metric> {
    if view.compare {
        vec![Metric::Hr01, Metric::Hr03]
    } else {
        vec![view.metric]
    }
}

/// Revision tag of the time series; depends on the range width only
pub fn time_series_revision(view: &ViewState) -> Revision {
    Revision::new(format!("ts-{}", view.range))
}

fn series_values(
    view: &ViewState,
    metric: Metric,
    national: &NationalIndex,
    cantonal: &CantonalIndex,
    month_count: usize,
) -> Vec<i64> {
    let values = match view.geo_mode {
        GeoMode::National => Some(national.series(metric)),
        GeoMode::Cantonal => view
            .selected_canton
            .as_ref()
            .and_then(|canton| cantonal.series(canton.as_str(), metric)),
    };

    // No canton selected or an unknown one: a flat zero line keeps alignment
    values
        .map(<[i64]>::to_vec)
        .unwrap_or_else(|| vec![0; month_count])
}

/// Project the time-series chart for a state
pub fn project_time_series(
    view: &ViewState,
    national: &NationalIndex,
    cantonal: &CantonalIndex,
    months: &[MonthId],
) -> TimeSeriesSpec {
    let metrics = plotted_metrics(view);
    let series = metrics
        .iter()
        .map(|&metric| Series {
            metric,
            name: metric.code().to_string(),
            values: series_values(view, metric, national, cantonal, months.len()),
        })
        .collect();

    let title = if view.compare {
        format!("HR01 vs HR03 ({})", view.geo_label())
    } else {
        format!("Monthly {} ({})", view.metric, view.geo_label())
    };

    let display_range = select_range(months, view.range)
        .bounds()
        .map(|(start, end)| DisplayRange {
            start: start.clone(),
            end: end.clone(),
        });

    tracing::trace!(%title, series = metrics.len(), "Projected time series");

    TimeSeriesSpec {
        title,
        months: months.to_vec(),
        series,
        display_range,
        revision: time_series_revision(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CantonCode, CantonSet, MonthAxis, RawFact};
    use crate::index::{build, IndexSet, RangeWidth};

    fn fixture() -> (MonthAxis, IndexSet) {
        let axis = MonthAxis::new(
            ["2023-01", "2023-02", "2023-03", "2023-04"]
                .iter()
                .map(|m| MonthId::from(*m))
                .collect(),
        );
        let cantons = CantonSet::new(vec!["ZH".into(), "BE".into()]);
        let facts = vec![
            RawFact::national("2023-01", Metric::Hr01, 10),
            RawFact::national("2023-02", Metric::Hr03, 4),
            RawFact::national("2023-04", Metric::Net, 6),
            RawFact::cantonal("2023-03", "ZH", Metric::Hr01, 3),
            RawFact::cantonal("2023-03", "BE", Metric::Net, -1),
        ];
        let index = build(&axis, &cantons, &facts);
        (axis, index)
    }

    fn state() -> ViewState {
        ViewState {
            metric: Metric::Net,
            geo_mode: GeoMode::National,
            selected_canton: Some(CantonCode::from("ZH")),
            compare: false,
            range: RangeWidth::Months(2),
        }
    }

    fn project(view: &ViewState) -> TimeSeriesSpec {
        let (axis, index) = fixture();
        project_time_series(view, &index.national, &index.cantonal, axis.months())
    }

    #[test]
    fn test_single_metric_national() {
        let chart = project(&state());

        assert_eq!(chart.metrics(), vec![Metric::Net]);
        assert_eq!(chart.series[0].values, vec![0, 0, 0, 6]);
        assert_eq!(chart.series[0].name, "NET");
        assert_eq!(chart.title, "Monthly NET (Switzerland)");
        assert_eq!(chart.months.len(), 4);
    }

    #[test]
    fn test_compare_overrides_metric() {
        for metric in Metric::all() {
            let view = ViewState {
                compare: true,
                metric: *metric,
                ..state()
            };
            let chart = project(&view);
            assert_eq!(chart.metrics(), vec![Metric::Hr01, Metric::Hr03]);
            assert_eq!(chart.series[0].values, vec![10, 0, 0, 0]);
            assert_eq!(chart.series[1].values, vec![0, 4, 0, 0]);
            assert_eq!(chart.title, "HR01 vs HR03 (Switzerland)");
        }
    }

    #[test]
    fn test_cantonal_mode_reads_selected_canton() {
        let view = ViewState {
            geo_mode: GeoMode::Cantonal,
            metric: Metric::Hr01,
            ..state()
        };
        let chart = project(&view);
        assert_eq!(chart.series[0].values, vec![0, 0, 3, 0]);
        assert_eq!(chart.title, "Monthly HR01 (ZH)");

        let view = ViewState {
            selected_canton: Some("BE".into()),
            metric: Metric::Net,
            ..view
        };
        assert_eq!(project(&view).series[0].values, vec![0, 0, -1, 0]);
    }

    #[test]
    fn test_series_span_full_axis_with_display_hint() {
        let chart = project(&state());
        assert!(chart.series.iter().all(|s| s.values.len() == 4));

        let hint = chart.display_range.unwrap();
        assert_eq!(hint.start.as_str(), "2023-03");
        assert_eq!(hint.end.as_str(), "2023-04");

        let all = project(&ViewState {
            range: RangeWidth::All,
            ..state()
        });
        let hint = all.display_range.unwrap();
        assert_eq!(hint.start.as_str(), "2023-01");
        assert_eq!(hint.end.as_str(), "2023-04");

        let none = project(&ViewState {
            range: RangeWidth::Months(0),
            ..state()
        });
        assert!(none.display_range.is_none());
    }

    #[test]
    fn test_revision_tracks_range_only() {
        let base = project(&state()).revision;

        let cantonal = project(&ViewState {
            geo_mode: GeoMode::Cantonal,
            selected_canton: Some("BE".into()),
            ..state()
        });
        assert_eq!(cantonal.revision, base);

        let other_metric = project(&ViewState {
            metric: Metric::Hr03,
            compare: true,
            ..state()
        });
        assert_eq!(other_metric.revision, base);

        let wider = project(&ViewState {
            range: RangeWidth::Months(12),
            ..state()
        });
        assert_ne!(wider.revision, base);
        assert_eq!(wider.revision.as_str(), "ts-12");
    }

    #[test]
    fn test_missing_canton_yields_zero_series() {
        let view = ViewState {
            geo_mode: GeoMode::Cantonal,
            selected_canton: None,
            ..state()
        };
        let chart = project(&view);
        assert_eq!(chart.series[0].values, vec![0, 0, 0, 0]);

        let view = ViewState {
            selected_canton: Some("XX".into()),
            ..view
        };
        assert_eq!(project(&view).series[0].values, vec![0, 0, 0, 0]);
    }
}
