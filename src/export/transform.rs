//! Publications → monthly facts
//!
//! ```text
//! (2023-01-17, " zh", HR01)      month 2023-01-01, canton ZH, HR01
//!            ↓ normalize + filter
//! counts[(2023-01-01, ZH)]   = [HR01, HR03]
//! counts[(2023-01-01, None)] = [HR01, HR03]     national = sum of valid cantons
//!            ↓
//! rows: HR01 (if > 0), HR03 (if > 0), NET = HR01 - HR03 (always)
//! ```
//!
//! Rows come out sorted by month, then national before cantonal, then canton,
//! then metric. This is the only place NET is computed.

use super::records::Publication;
use crate::data::{CantonCode, GeoScope, Metric, MonthId};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Canton abbreviations accepted by the export, in alphabetical order
pub const VALID_CANTONS: [&str; 26] = [
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW",
    "SG", "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH",
];

/// Keys of the `measures` list in the dimensions document
pub const MEASURES: [&str; 1] = ["count"];

/// One row of the facts document as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFact {
    pub month: MonthId,
    pub geo: GeoScope,
    /// `null` on national rows
    pub kanton: Option<CantonCode>,
    pub hr: Metric,
    pub count: i64,
}

/// The dimensions document as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionsDocument {
    pub metrics: Vec<Metric>,
    pub measures: Vec<String>,
    pub cantons: Vec<CantonCode>,
    pub months: Vec<MonthId>,
}

/// Why a publication was left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportDiagnostics {
    pub publications: usize,
    pub counted: usize,
    pub invalid_date: usize,
    pub invalid_canton: usize,
    pub other_rubric: usize,
}

/// Output of [`aggregate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExport {
    pub facts: Vec<MonthlyFact>,
    pub dimensions: DimensionsDocument,
    pub diagnostics: ExportDiagnostics,
}

/// Upper-cased, trimmed canton code if it is one of [`VALID_CANTONS`]
pub fn normalize_canton(raw: &str) -> Option<CantonCode> {
    let code = raw.trim().to_ascii_uppercase();
    VALID_CANTONS
        .contains(&code.as_str())
        .then(|| CantonCode::new(code))
}

/// HR01 or HR03 from a sub-rubric; every other rubric is ignored
pub fn registry_metric(subrubric: &str) -> Option<Metric> {
    match subrubric.to_ascii_uppercase().as_str() {
        "HR01" => Some(Metric::Hr01),
        "HR03" => Some(Metric::Hr03),
        _ => None,
    }
}

fn month_key(date: chrono::NaiveDate) -> MonthId {
    MonthId::new(format!("{:04}-{:02}-01", date.year(), date.month()))
}

/// Count publications per month, canton and rubric and derive NET
pub fn aggregate(publications: &[Publication]) -> MonthlyExport {
    let mut diagnostics = ExportDiagnostics {
        publications: publications.len(),
        ..Default::default()
    };

    // None sorts before Some: national rows precede cantonal ones
    let mut counts: BTreeMap<(MonthId, Option<CantonCode>), [i64; 2]> = BTreeMap::new();

    for publication in publications {
        let Some(date) = publication.parsed_date() else {
            diagnostics.invalid_date += 1;
            continue;
        };
        let Some(canton) = publication.kanton.as_deref().and_then(normalize_canton) else {
            diagnostics.invalid_canton += 1;
            continue;
        };
        let Some(metric) = publication.subrubric.as_deref().and_then(registry_metric) else {
            diagnostics.other_rubric += 1;
            continue;
        };

        let month = month_key(date);
        let slot = metric.slot();
        counts.entry((month.clone(), Some(canton))).or_default()[slot] += 1;
        counts.entry((month, None)).or_default()[slot] += 1;
        diagnostics.counted += 1;
    }

    let mut facts = Vec::with_capacity(counts.len() * 3);
    for ((month, canton), totals) in counts {
        let geo = if canton.is_some() {
            GeoScope::Cantonal
        } else {
            GeoScope::National
        };
        let hr01 = totals[Metric::Hr01.slot()];
        let hr03 = totals[Metric::Hr03.slot()];

        let row = |hr: Metric, count: i64| MonthlyFact {
            month: month.clone(),
            geo,
            kanton: canton.clone(),
            hr,
            count,
        };

        if hr01 > 0 {
            facts.push(row(Metric::Hr01, hr01));
        }
        if hr03 > 0 {
            facts.push(row(Metric::Hr03, hr03));
        }
        facts.push(row(Metric::Net, hr01 - hr03));
    }

    let mut months: Vec<MonthId> = facts.iter().map(|f| f.month.clone()).collect();
    months.dedup();

    let dimensions = DimensionsDocument {
        metrics: Metric::all().to_vec(),
        measures: MEASURES.iter().map(|m| m.to_string()).collect(),
        cantons: VALID_CANTONS.iter().map(|c| CantonCode::from(*c)).collect(),
        months,
    };

    MonthlyExport {
        facts,
        dimensions,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CantonSet, MonthAxis, RawFact};
    use crate::index::build;

    fn rows(export: &MonthlyExport) -> Vec<(String, Option<String>, Metric, i64)> {
        export
            .facts
            .iter()
            .map(|f| {
                (
                    f.month.to_string(),
                    f.kanton.as_ref().map(|c| c.to_string()),
                    f.hr,
                    f.count,
                )
            })
            .collect()
    }

    #[test]
    fn test_normalize_canton() {
        assert_eq!(normalize_canton(" zh "), Some(CantonCode::from("ZH")));
        assert_eq!(normalize_canton("Ge"), Some(CantonCode::from("GE")));
        assert_eq!(normalize_canton("CH"), None);
        assert_eq!(normalize_canton("ZH, BE"), None);
        assert_eq!(normalize_canton(""), None);
    }

    #[test]
    fn test_counts_and_net() {
        let publications = vec![
            Publication::new("2023-01-03", "ZH", "HR01"),
            Publication::new("2023-01-20", "zh", "hr01"),
            Publication::new("2023-01-21", "ZH", "HR03"),
            Publication::new("2023-01-31", "BE", "HR03"),
            Publication::new("2023-02-01", "AG", "HR01"),
        ];

        let export = aggregate(&publications);
        let row = |month: &str, canton: Option<&str>, hr: Metric, count: i64| {
            (month.to_string(), canton.map(String::from), hr, count)
        };

        assert_eq!(
            rows(&export),
            vec![
                row("2023-01-01", None, Metric::Hr01, 2),
                row("2023-01-01", None, Metric::Hr03, 2),
                row("2023-01-01", None, Metric::Net, 0),
                row("2023-01-01", Some("BE"), Metric::Hr03, 1),
                row("2023-01-01", Some("BE"), Metric::Net, -1),
                row("2023-01-01", Some("ZH"), Metric::Hr01, 2),
                row("2023-01-01", Some("ZH"), Metric::Hr03, 1),
                row("2023-01-01", Some("ZH"), Metric::Net, 1),
                row("2023-02-01", None, Metric::Hr01, 1),
                row("2023-02-01", None, Metric::Net, 1),
                row("2023-02-01", Some("AG"), Metric::Hr01, 1),
                row("2023-02-01", Some("AG"), Metric::Net, 1),
            ]
        );
        assert_eq!(export.facts[0].geo, GeoScope::National);
        assert_eq!(export.facts[3].geo, GeoScope::Cantonal);
    }

    #[test]
    fn test_filters_are_counted() {
        let publications = vec![
            Publication::new("2023-01-03", "ZH", "HR01"),
            Publication::new("not a date", "ZH", "HR01"),
            Publication::new("2023-01-03", "XX", "HR01"),
            Publication::new("2023-01-03", "ZH", "HR02"),
            Publication::default(),
        ];

        let diag = aggregate(&publications).diagnostics;

        assert_eq!(diag.publications, 5);
        assert_eq!(diag.counted, 1);
        assert_eq!(diag.invalid_date, 2);
        assert_eq!(diag.invalid_canton, 1);
        assert_eq!(diag.other_rubric, 1);
    }

    #[test]
    fn test_dimensions_document() {
        let publications = vec![
            Publication::new("2023-03-09", "TI", "HR01"),
            Publication::new("2022-12-31T10:00:00", "VD", "HR03"),
        ];

        let dims = aggregate(&publications).dimensions;

        assert_eq!(dims.metrics, vec![Metric::Hr01, Metric::Hr03, Metric::Net]);
        assert_eq!(dims.measures, vec!["count".to_string()]);
        assert_eq!(dims.cantons.len(), 26);
        assert_eq!(dims.cantons.first().map(|c| c.as_str()), Some("AG"));
        assert_eq!(
            dims.months,
            vec![MonthId::from("2022-12-01"), MonthId::from("2023-03-01")]
        );

        let json = serde_json::to_value(&dims).unwrap();
        assert_eq!(json["metrics"], serde_json::json!(["HR01", "HR03", "NET"]));
    }

    #[test]
    fn test_nothing_counted_gives_empty_documents() {
        let export = aggregate(&[Publication::new("2023-01-03", "ZH", "HR05")]);
        assert!(export.facts.is_empty());
        assert!(export.dimensions.months.is_empty());
        assert_eq!(export.dimensions.cantons.len(), 26);
    }

    #[test]
    fn test_export_feeds_the_index_builder() {
        let publications = vec![
            Publication::new("2023-01-03", "ZH", "HR01"),
            Publication::new("2023-02-03", "ZH", "HR03"),
            Publication::new("2023-02-04", "ZH", "HR03"),
        ];
        let export = aggregate(&publications);

        let json = serde_json::to_string(&export.facts).unwrap();
        let facts: Vec<RawFact> = serde_json::from_str(&json).unwrap();
        let axis = MonthAxis::new(export.dimensions.months.clone());
        let cantons = CantonSet::new(export.dimensions.cantons.clone());

        let index = build(&axis, &cantons, &facts);

        assert_eq!(index.diagnostics.rows_dropped(), 0);
        assert_eq!(index.national.series(Metric::Net), &[1, -2]);
        assert_eq!(index.cantonal.series("ZH", Metric::Hr03), Some(&[0, 2][..]));
        assert_eq!(index.cantonal.series("BE", Metric::Net), Some(&[0, 0][..]));
    }
}
