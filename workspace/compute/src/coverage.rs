use common::{CoverageRow, CoverageSummary, CoverageSummaryEntry, DataKind};
use tracing::{debug, error, info, instrument};

use crate::api::PowercastApi;
use crate::error::Result;

/// Everything the coverage page renders for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageView {
    pub kind: DataKind,
    pub rows: Vec<CoverageRow>,
    pub summary: CoverageSummary,
}

impl CoverageView {
    /// Summary lines for every category, in display order.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        DataKind::ALL
            .iter()
            .map(|kind| (kind.label(), summary_line(*kind, summary_entry(&self.summary, *kind))))
            .collect()
    }
}

pub fn summary_entry(summary: &CoverageSummary, kind: DataKind) -> Option<&CoverageSummaryEntry> {
    match kind {
        DataKind::Load => summary.load.as_ref(),
        DataKind::Weather => summary.weather.as_ref(),
        DataKind::Holidays => summary.holidays.as_ref(),
    }
}

/// `2024-01-01 → 2024-01-31 (744h, 11 regions)`, or `no data` whenever the
/// backend does not report stored data for the category.
pub fn summary_line(kind: DataKind, entry: Option<&CoverageSummaryEntry>) -> String {
    let Some(entry) = entry.filter(|e| e.exists) else {
        return "no data".to_string();
    };
    let unit = if kind.is_daily() { "d" } else { "h" };
    let noun = match kind {
        DataKind::Weather => "locations",
        _ => "regions",
    };
    format!(
        "{} → {} ({}{}, {} {})",
        entry.from.as_deref().unwrap_or("-"),
        entry.to.as_deref().unwrap_or("-"),
        entry.count(),
        unit,
        entry.keys,
        noun
    )
}

/// Table headers for a category.
pub fn columns(kind: DataKind) -> [&'static str; 4] {
    let key = match kind {
        DataKind::Weather => "Location",
        _ => "Region",
    };
    let count = if kind.is_daily() { "Days" } else { "Hours" };
    [key, "From", "To", count]
}

/// Cells of one row, matching [`columns`].
pub fn row_cells(row: &CoverageRow) -> [String; 4] {
    [
        row.key().to_string(),
        row.from.clone().unwrap_or_default(),
        row.to.clone().unwrap_or_default(),
        row.count().map(|n| n.to_string()).unwrap_or_default(),
    ]
}

/// Requests rows and summary together and waits for both.
#[instrument(skip(api))]
pub async fn load_coverage<A>(api: &A, kind: DataKind) -> Result<CoverageView>
where
    A: PowercastApi + ?Sized,
{
    debug!("Loading {} coverage", kind);
    let (rows, summary) = futures_util::join!(api.coverage(kind), api.coverage_summary());

    let rows = rows.inspect_err(|e| error!("Failed to load {} coverage: {}", kind, e))?;
    let summary = summary.inspect_err(|e| error!("Failed to load coverage summary: {}", e))?;

    info!("Loaded {} coverage rows for {}", rows.coverage.len(), kind);
    Ok(CoverageView {
        kind,
        rows: rows.coverage,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;
    use common::CoverageResponse;

    fn entry(exists: bool) -> CoverageSummaryEntry {
        CoverageSummaryEntry {
            exists,
            from: Some("2024-01-01T00:00:00".into()),
            to: Some("2024-01-31T23:00:00".into()),
            hours: Some(744),
            days: None,
            keys: 11,
        }
    }

    #[test]
    fn test_missing_flag_means_no_data() {
        assert_eq!(summary_line(DataKind::Load, Some(&entry(false))), "no data");
        assert_eq!(summary_line(DataKind::Weather, None), "no data");
    }

    #[test]
    fn test_summary_line_units_and_nouns() {
        assert_eq!(
            summary_line(DataKind::Load, Some(&entry(true))),
            "2024-01-01T00:00:00 → 2024-01-31T23:00:00 (744h, 11 regions)"
        );
        assert_eq!(
            summary_line(DataKind::Weather, Some(&entry(true))),
            "2024-01-01T00:00:00 → 2024-01-31T23:00:00 (744h, 11 locations)"
        );
        let holidays = CoverageSummaryEntry {
            exists: true,
            from: Some("2024-01-01".into()),
            to: Some("2024-12-25".into()),
            hours: None,
            days: Some(11),
            keys: 1,
        };
        assert_eq!(
            summary_line(DataKind::Holidays, Some(&holidays)),
            "2024-01-01 → 2024-12-25 (11d, 1 regions)"
        );
    }

    #[test]
    fn test_column_mapping() {
        assert_eq!(columns(DataKind::Load), ["Region", "From", "To", "Hours"]);
        assert_eq!(columns(DataKind::Weather), ["Location", "From", "To", "Hours"]);
        assert_eq!(columns(DataKind::Holidays), ["Region", "From", "To", "Days"]);

        let row = CoverageRow {
            location: Some("KNYC".into()),
            from: Some("a".into()),
            hours: Some(5),
            ..Default::default()
        };
        assert_eq!(row_cells(&row), ["KNYC".to_string(), "a".into(), "".into(), "5".into()]);
    }

    #[tokio::test]
    async fn test_both_requests_are_issued() {
        let mut api = MockApi::default();
        api.coverage = Ok(CoverageResponse {
            coverage: vec![CoverageRow {
                region: Some("WEST".into()),
                ..Default::default()
            }],
        });
        api.summary = Ok(CoverageSummary {
            load: Some(entry(true)),
            ..Default::default()
        });

        let view = load_coverage(&api, DataKind::Load).await.unwrap();

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "GET /api/series/coverage type=load".to_string(),
                "GET /api/series/coverage/summary".to_string(),
            ]
        );
        assert_eq!(view.rows.len(), 1);
        let lines = view.summary_lines();
        assert_eq!(lines[0].0, "Load");
        assert!(lines[0].1.ends_with("(744h, 11 regions)"));
        assert_eq!(lines[1].1, "no data");
        assert_eq!(lines[2].1, "no data");
    }

    #[tokio::test]
    async fn test_either_failure_fails_the_view() {
        let mut api = MockApi::default();
        api.summary = Err(ApiError::Status(500));
        let err = load_coverage(&api, DataKind::Weather).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 500");
        assert_eq!(api.calls().len(), 2);
    }
}
