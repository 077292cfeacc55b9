//! Heatmap projection
//!
//! Rows are cantons restricted to the visible window of the selected
//! metric. The compare flag does not apply here.

use super::chart::{ColorScale, HeatmapRow, HeatmapSpec, Revision, ValueBounds};
use super::state::ViewState;
use crate::data::{Metric, MonthId};
use crate::index::{select_range, CantonalIndex, RangeSelection};

/// Revision tag of the heatmap; depends on range width and metric
pub fn heatmap_revision(view: &ViewState) -> Revision {
    Revision::new(format!("hm-{}-{}", view.range, view.metric))
}

/// Color policy for a metric
pub fn color_scale_for(metric: Metric) -> ColorScale {
    match metric {
        Metric::Net => ColorScale::net_change(),
        Metric::Hr01 | Metric::Hr03 => ColorScale::Sequential,
    }
}

/// Min/max over every cell; `(0, 0)` when there are none
fn value_bounds(rows: &[HeatmapRow]) -> ValueBounds {
    let mut cells = rows.iter().flat_map(|row| row.values.iter().copied());
    match cells.next() {
        Some(first) => cells.fold(ValueBounds { min: first, max: first }, |b, v| ValueBounds {
            min: b.min.min(v),
            max: b.max.max(v),
        }),
        None => ValueBounds::default(),
    }
}

/// Project the heatmap for an explicit window
pub fn project_heatmap_window(
    view: &ViewState,
    cantonal: &CantonalIndex,
    window: RangeSelection<'_>,
) -> HeatmapSpec {
    let metric = view.metric;

    let mut rows: Vec<HeatmapRow> = cantonal
        .iter()
        .map(|(canton, table)| {
            let values = window.slice(table.get(metric)).to_vec();
            let total = values.iter().fold(0i64, |acc, v| acc.saturating_add(*v));
            HeatmapRow {
                canton: canton.clone(),
                values,
                total,
            }
        })
        .collect();

    // Stable: equal totals keep canton enumeration order
    rows.sort_by(|a, b| b.total.cmp(&a.total));

    let bounds = value_bounds(&rows);

    tracing::trace!(rows = rows.len(), min = bounds.min, max = bounds.max, "Projected heatmap");

    HeatmapSpec {
        title: format!("Heatmap by Canton ({})", metric),
        metric,
        months: window.visible.to_vec(),
        rows,
        bounds,
        color_scale: color_scale_for(metric),
        revision: heatmap_revision(view),
    }
}

/// Project the heatmap, selecting the window from the state's range width
pub fn project_heatmap(
    view: &ViewState,
    cantonal: &CantonalIndex,
    months: &[MonthId],
) -> HeatmapSpec {
    project_heatmap_window(view, cantonal, select_range(months, view.range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CantonCode, CantonSet, MonthAxis, RawFact};
    use crate::index::{build, IndexSet, RangeWidth};
    use crate::view::chart::Tone;
    use crate::view::state::GeoMode;

    fn axis() -> MonthAxis {
        MonthAxis::new(
            ["2023-01", "2023-02", "2023-03", "2023-04"]
                .iter()
                .map(|m| MonthId::from(*m))
                .collect(),
        )
    }

    fn index(codes: &[&str], facts: &[RawFact]) -> IndexSet {
        let cantons = CantonSet::new(codes.iter().map(|c| CantonCode::from(*c)).collect());
        build(&axis(), &cantons, facts)
    }

    fn state(metric: Metric, range: RangeWidth) -> ViewState {
        ViewState {
            metric,
            geo_mode: GeoMode::National,
            selected_canton: None,
            compare: false,
            range,
        }
    }

    fn heatmap(index: &IndexSet, metric: Metric, range: RangeWidth) -> HeatmapSpec {
        project_heatmap(&state(metric, range), &index.cantonal, axis().months())
    }

    fn order(chart: &HeatmapSpec) -> Vec<&str> {
        chart.rows.iter().map(|r| r.canton.as_str()).collect()
    }

    #[test]
    fn test_rows_sorted_by_visible_total() {
        let index = index(
            &["AG", "BE", "ZH"],
            &[
                // AG is large only outside the window
                RawFact::cantonal("2023-01", "AG", Metric::Hr01, 100),
                RawFact::cantonal("2023-03", "BE", Metric::Hr01, 2),
                RawFact::cantonal("2023-04", "ZH", Metric::Hr01, 5),
            ],
        );
        let chart = heatmap(&index, Metric::Hr01, RangeWidth::Months(2));

        assert_eq!(order(&chart), vec!["ZH", "BE", "AG"]);
        assert_eq!(chart.rows[0].values, vec![0, 5]);
        assert_eq!(chart.rows[0].total, 5);
        assert_eq!(chart.months.len(), 2);
        assert_eq!(chart.months[0].as_str(), "2023-03");

        let all = heatmap(&index, Metric::Hr01, RangeWidth::All);
        assert_eq!(order(&all), vec!["AG", "ZH", "BE"]);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let index = index(
            &["SG", "AG", "ZH", "BE"],
            &[
                RawFact::cantonal("2023-04", "ZH", Metric::Hr03, 1),
                RawFact::cantonal("2023-04", "AG", Metric::Hr03, 1),
            ],
        );
        let chart = heatmap(&index, Metric::Hr03, RangeWidth::All);

        assert_eq!(order(&chart), vec!["AG", "ZH", "SG", "BE"]);
        for pair in chart.rows.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn test_bounds_cover_every_cell() {
        let index = index(
            &["AG", "ZH"],
            &[
                RawFact::cantonal("2023-03", "AG", Metric::Net, -7),
                RawFact::cantonal("2023-04", "ZH", Metric::Net, 12),
                RawFact::cantonal("2023-01", "ZH", Metric::Net, 99),
            ],
        );
        let chart = heatmap(&index, Metric::Net, RangeWidth::Months(3));

        assert_eq!(chart.bounds, ValueBounds { min: -7, max: 12 });
        for row in &chart.rows {
            for value in &row.values {
                assert!(chart.bounds.contains(*value));
            }
        }
    }

    #[test]
    fn test_bounds_default_when_empty() {
        let no_cantons = index(&[], &[]);
        let chart = heatmap(&no_cantons, Metric::Hr01, RangeWidth::All);
        assert!(chart.rows.is_empty());
        assert_eq!(chart.bounds, ValueBounds { min: 0, max: 0 });

        let with_cantons = index(&["ZH"], &[RawFact::cantonal("2023-04", "ZH", Metric::Hr01, 3)]);
        let chart = heatmap(&with_cantons, Metric::Hr01, RangeWidth::Months(0));
        assert_eq!(chart.rows.len(), 1);
        assert!(chart.rows[0].values.is_empty());
        assert_eq!(chart.bounds, ValueBounds::default());
    }

    #[test]
    fn test_color_scale_policy() {
        let index = index(&["ZH"], &[]);
        let net = heatmap(&index, Metric::Net, RangeWidth::All);
        assert_eq!(net.color_scale, ColorScale::net_change());
        assert_eq!(net.color_scale.tone(3), Tone::Growth);
        assert_eq!(net.color_scale.tone(-3), Tone::Decline);

        for metric in [Metric::Hr01, Metric::Hr03] {
            let chart = heatmap(&index, metric, RangeWidth::All);
            assert_eq!(chart.color_scale, ColorScale::Sequential);
        }
    }

    #[test]
    fn test_compare_flag_is_ignored() {
        let index = index(&["ZH"], &[RawFact::cantonal("2023-04", "ZH", Metric::Net, 2)]);
        let plain = state(Metric::Net, RangeWidth::All);
        let compared = ViewState {
            compare: true,
            ..plain.clone()
        };

        let a = project_heatmap(&plain, &index.cantonal, axis().months());
        let b = project_heatmap(&compared, &index.cantonal, axis().months());
        assert_eq!(a, b);
        assert_eq!(a.title, "Heatmap by Canton (NET)");
    }

    #[test]
    fn test_revision_tracks_range_and_metric() {
        let index = index(&["ZH"], &[]);
        let base_state = state(Metric::Net, RangeWidth::Months(12));
        let base = project_heatmap(&base_state, &index.cantonal, axis().months()).revision;
        assert_eq!(base.as_str(), "hm-12-NET");

        let drilled = ViewState {
            geo_mode: GeoMode::Cantonal,
            selected_canton: Some("ZH".into()),
            compare: true,
            ..base_state.clone()
        };
        assert_eq!(project_heatmap(&drilled, &index.cantonal, axis().months()).revision, base);

        let metric = ViewState {
            metric: Metric::Hr01,
            ..base_state.clone()
        };
        assert_ne!(project_heatmap(&metric, &index.cantonal, axis().months()).revision, base);

        let range = ViewState {
            range: RangeWidth::All,
            ..base_state
        };
        assert_ne!(project_heatmap(&range, &index.cantonal, axis().months()).revision, base);
    }

    #[test]
    fn test_canton_at_maps_row_back() {
        let index = index(&["AG", "ZH"], &[RawFact::cantonal("2023-04", "ZH", Metric::Hr01, 1)]);
        let chart = heatmap(&index, Metric::Hr01, RangeWidth::All);
        assert_eq!(chart.canton_at(0).map(|c| c.as_str()), Some("ZH"));
        assert_eq!(chart.canton_at(5), None);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let index = index(
            &["AG", "ZH"],
            &[
                RawFact::cantonal("2023-03", "ZH", Metric::Hr01, i64::MAX),
                RawFact::cantonal("2023-04", "ZH", Metric::Hr01, i64::MAX),
                RawFact::cantonal("2023-03", "AG", Metric::Hr01, i64::MIN),
                RawFact::cantonal("2023-04", "AG", Metric::Hr01, -1),
            ],
        );
        let chart = heatmap(&index, Metric::Hr01, RangeWidth::All);

        assert_eq!(order(&chart), vec!["ZH", "AG"]);
        assert_eq!(chart.rows[0].total, i64::MAX);
        assert_eq!(chart.rows[1].total, i64::MIN);
        assert_eq!(chart.bounds, ValueBounds { min: i64::MIN, max: i64::MAX });
    }

    #[test]
    fn test_unrepresentable_counts_never_reach_the_heatmap() {
        let facts: Vec<RawFact> = serde_json::from_str(
            r#"[
                {"month": "2023-03", "geo": "KT", "kanton": "ZH", "hr": "HR01", "count": 1e22},
                {"month": "2023-04", "geo": "KT", "kanton": "ZH", "hr": "HR01", "count": 1e22},
                {"month": "2023-04", "geo": "KT", "kanton": "AG", "hr": "HR01",
                 "count": 9007199254740993}
            ]"#,
        )
        .unwrap();
        let index = index(&["AG", "ZH"], &facts);
        assert_eq!(index.diagnostics.invalid_count, 2);

        let chart = heatmap(&index, Metric::Hr01, RangeWidth::Months(2));
        assert_eq!(order(&chart), vec!["AG", "ZH"]);
        assert_eq!(chart.rows[0].values, vec![0, 9_007_199_254_740_993]);
        assert_eq!(chart.rows[1].total, 0);
    }
}
