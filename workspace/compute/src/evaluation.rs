use common::{ActualPoint, ForecastPoint, MapeReport};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, instrument};

use crate::api::PowercastApi;
use crate::error::Result;
use crate::timestamps::{compare_timestamps, normalize_instant};

/// A forecast value next to the measurement taken at the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationPoint {
    pub ts: String,
    pub forecast: f64,
    pub actual: Option<f64>,
}

/// Forecast and actual series aligned for one forecast run.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub forecast_id: String,
    pub region: String,
    /// Range sent to the actuals endpoint.
    pub from: String,
    pub to: String,
    pub series: Vec<EvaluationPoint>,
    pub mape: MapeReport,
}

impl Evaluation {
    /// Number of points that have a measurement.
    pub fn matched_points(&self) -> usize {
        self.series.iter().filter(|p| p.actual.is_some()).count()
    }

    /// `MAPE: 4.21% (points=168)`.
    pub fn headline(&self) -> String {
        match self.mape.mape {
            Some(mape) => format!("MAPE: {:.2}% (points={})", mape, self.mape.points),
            None => format!("MAPE: n/a (points={})", self.mape.points),
        }
    }

    /// Range the backend computed the metric over.
    pub fn mape_range(&self) -> String {
        format!(
            "{} → {}",
            self.mape.from.as_deref().unwrap_or("-"),
            self.mape.to.as_deref().unwrap_or("-")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// The forecast holds no values; nothing else was requested.
    Empty,
    Ready(Evaluation),
}

/// Attaches to every forecast point the actual value recorded at exactly the
/// same timestamp.
///
/// No interpolation or tolerance is applied. A forecast timestamp that occurs
/// twice keeps its first value, and the result is ordered by time.
pub fn merge_series(forecast: &[ForecastPoint], actual: &[ActualPoint]) -> Vec<EvaluationPoint> {
    let lookup: HashMap<&str, f64> = actual.iter().map(|a| (a.ts.as_str(), a.load_mw)).collect();
    let mut seen = HashSet::new();

    let mut merged: Vec<EvaluationPoint> = forecast
        .iter()
        .filter(|point| seen.insert(point.ts.as_str()))
        .map(|point| EvaluationPoint {
            ts: point.ts.clone(),
            forecast: point.yhat,
            actual: lookup.get(point.ts.as_str()).copied(),
        })
        .collect();

    merged.sort_by(|a, b| compare_timestamps(&a.ts, &b.ts));
    merged
}

/// Loads a forecast, the measurements over its range, and the backend's MAPE
/// for it.
///
/// Any of the three calls failing aborts the workflow with that error.
#[instrument(skip(api))]
pub async fn evaluate_forecast<A>(api: &A, forecast_id: &str, region: &str) -> Result<EvaluationOutcome>
where
    A: PowercastApi + ?Sized,
{
    debug!("Evaluating forecast {} for region {}", forecast_id, region);

    let record = api.forecast_detail(forecast_id).await.inspect_err(|e| {
        error!("Failed to fetch forecast {}: {}", forecast_id, e);
    })?;

    let (Some(first), Some(last)) = (record.values.first(), record.values.last()) else {
        debug!("Forecast {} has no values, skipping evaluation", forecast_id);
        return Ok(EvaluationOutcome::Empty);
    };

    let from = normalize_instant(&first.ts).unwrap_or_else(|| first.ts.clone());
    let to = normalize_instant(&last.ts).unwrap_or_else(|| last.ts.clone());

    let actual = api.actual_series(region, &from, &to).await.inspect_err(|e| {
        error!("Failed to fetch actuals for {} {} → {}: {}", region, from, to, e);
    })?;

    let series = merge_series(&record.values, &actual);
    debug!(
        "Merged {} forecast points with {} actual points",
        record.values.len(),
        actual.len()
    );

    let mape = api.mape_for_forecast(forecast_id).await.inspect_err(|e| {
        error!("Failed to fetch MAPE for forecast {}: {}", forecast_id, e);
    })?;

    let evaluation = Evaluation {
        forecast_id: forecast_id.to_string(),
        region: region.to_string(),
        from,
        to,
        series,
        mape,
    };
    info!(
        "Evaluated forecast {}: {} points, {} matched",
        forecast_id,
        evaluation.series.len(),
        evaluation.matched_points()
    );
    Ok(EvaluationOutcome::Ready(evaluation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;
    use common::ForecastRecord;

    fn fp(ts: &str, yhat: f64) -> ForecastPoint {
        ForecastPoint { ts: ts.into(), yhat }
    }

    fn ap(ts: &str, load_mw: f64) -> ActualPoint {
        ActualPoint { ts: ts.into(), load_mw }
    }

    #[test]
    fn test_merge_attaches_only_exact_matches() {
        let merged = merge_series(&[fp("t1", 5.0), fp("t2", 7.0)], &[ap("t1", 4.5)]);
        assert_eq!(
            merged,
            vec![
                EvaluationPoint { ts: "t1".into(), forecast: 5.0, actual: Some(4.5) },
                EvaluationPoint { ts: "t2".into(), forecast: 7.0, actual: None },
            ]
        );
    }

    #[test]
    fn test_merge_has_no_tolerance_window() {
        let merged = merge_series(
            &[fp("2024-01-01T01:00:00", 10.0)],
            &[ap("2024-01-01T01:00:01", 9.0), ap("2024-01-01T00:59:59", 11.0)],
        );
        assert_eq!(merged[0].actual, None);
    }

    #[test]
    fn test_merge_keeps_each_forecast_timestamp_once() {
        let merged = merge_series(
            &[fp("2024-01-01T00:00:00", 1.0), fp("2024-01-01T00:00:00", 2.0)],
            &[ap("2024-01-01T00:00:00", 3.0)],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].forecast, 1.0);
        assert_eq!(merged[0].actual, Some(3.0));
    }

    #[test]
    fn test_merge_sorts_by_time() {
        let merged = merge_series(
            &[
                fp("Mon, 01 Jan 2024 02:00:00 GMT", 3.0),
                fp("Mon, 01 Jan 2024 00:00:00 GMT", 1.0),
                fp("Mon, 01 Jan 2024 01:00:00 GMT", 2.0),
            ],
            &[],
        );
        let values: Vec<f64> = merged.iter().map(|p| p.forecast).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_merge_ignores_actuals_outside_forecast() {
        let merged = merge_series(&[fp("t1", 5.0)], &[ap("t0", 1.0), ap("t1", 2.0), ap("t9", 3.0)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].actual, Some(2.0));
    }

    #[tokio::test]
    async fn test_empty_forecast_stops_after_detail() {
        let api = MockApi::default();

        let outcome = evaluate_forecast(&api, "f1", "N.Y.C.").await.unwrap();

        assert_eq!(outcome, EvaluationOutcome::Empty);
        assert_eq!(api.calls(), vec!["GET /api/forecast/f1".to_string()]);
    }

    #[tokio::test]
    async fn test_full_evaluation_sequence() {
        let mut api = MockApi::default();
        api.detail = Ok(ForecastRecord {
            id: Some("f1".into()),
            values: vec![
                fp("Mon, 01 Jan 2024 00:00:00 GMT", 5.0),
                fp("Mon, 01 Jan 2024 01:00:00 GMT", 7.0),
            ],
            ..Default::default()
        });
        api.actual = Ok(vec![ap("Mon, 01 Jan 2024 00:00:00 GMT", 4.5)]);
        api.mape = Ok(MapeReport {
            points: 1,
            mape: Some(11.1111),
            from: Some("2024-01-01T00:00:00".into()),
            to: Some("2024-01-01T00:00:00".into()),
        });

        let EvaluationOutcome::Ready(evaluation) =
            evaluate_forecast(&api, "f1", "N.Y.C.").await.unwrap()
        else {
            panic!("expected a ready evaluation");
        };

        assert_eq!(
            api.calls(),
            vec![
                "GET /api/forecast/f1".to_string(),
                "GET /api/series/actual region=N.Y.C. from=2024-01-01T00:00:00.000Z to=2024-01-01T01:00:00.000Z".to_string(),
                "GET /api/metrics/mape/for-forecast forecast_id=f1".to_string(),
            ]
        );
        assert_eq!(evaluation.series.len(), 2);
        assert_eq!(evaluation.matched_points(), 1);
        assert_eq!(evaluation.series[1].actual, None);
        assert_eq!(evaluation.headline(), "MAPE: 11.11% (points=1)");
        assert_eq!(evaluation.mape_range(), "2024-01-01T00:00:00 → 2024-01-01T00:00:00");
    }

    #[tokio::test]
    async fn test_unparseable_range_is_passed_through() {
        let mut api = MockApi::default();
        api.detail = Ok(ForecastRecord {
            values: vec![fp("t1", 1.0), fp("t2", 2.0)],
            ..Default::default()
        });

        evaluate_forecast(&api, "f1", "WEST").await.unwrap();

        assert_eq!(api.calls()[1], "GET /api/series/actual region=WEST from=t1 to=t2");
    }

    #[tokio::test]
    async fn test_actuals_failure_aborts_before_mape() {
        let mut api = MockApi::default();
        api.detail = Ok(ForecastRecord {
            values: vec![fp("2024-01-01T00:00:00", 1.0)],
            ..Default::default()
        });
        api.actual = Err(ApiError::Backend {
            status: 400,
            message: "region, from, to are required".into(),
        });

        let err = evaluate_forecast(&api, "f1", "WEST").await.unwrap_err();

        assert_eq!(err.to_string(), "region, from, to are required");
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_headline_without_metric() {
        let evaluation = Evaluation {
            forecast_id: "f1".into(),
            region: "WEST".into(),
            from: "a".into(),
            to: "b".into(),
            series: Vec::new(),
            mape: MapeReport::default(),
        };
        assert_eq!(evaluation.headline(), "MAPE: n/a (points=0)");
        assert_eq!(evaluation.mape_range(), "- → -");
    }
}
