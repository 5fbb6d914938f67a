use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use common::{ForecastPoint, ForecastQuery, ForecastSummary, RunForecastRequest, DEFAULT_REGION};
use tracing::{debug, error, info, instrument, warn};

use crate::api::PowercastApi;
use crate::error::{FormError, WorkflowError};
use crate::timestamps::{end_of_day, start_of_day, start_of_hour, to_iso_instant};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 7;

/// Inputs of the "run forecast" form.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastForm {
    pub region: String,
    /// Start picked by the user, in the user's offset.
    pub start: Option<DateTime<FixedOffset>>,
    pub days: u32,
}

impl Default for ForecastForm {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            start: None,
            days: MAX_DAYS,
        }
    }
}

impl ForecastForm {
    /// The run button stays disabled until a start is chosen.
    pub fn can_run(&self) -> bool {
        self.start.is_some()
    }

    /// Request body with the start truncated to the hour.
    pub fn to_request(&self) -> Result<RunForecastRequest, FormError> {
        let start = self
            .start
            .as_ref()
            .ok_or(FormError::Missing("Please select a start date."))?;
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(FormError::Invalid(format!(
                "Days must be between {} and {}.",
                MIN_DAYS, MAX_DAYS
            )));
        }
        let start = start_of_hour(start)
            .ok_or_else(|| FormError::Invalid("Invalid start date.".to_string()))?;

        Ok(RunForecastRequest {
            region: self.region.clone(),
            start_date: to_iso_instant(&start),
            days: self.days,
        })
    }
}

/// A finished forecast run with its predicted series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRun {
    pub forecast_id: String,
    pub export_id: Option<String>,
    pub points: Vec<ForecastPoint>,
}

impl ForecastRun {
    pub fn message(&self) -> String {
        format!("Forecast OK ({} points).", self.points.len())
    }
}

/// Runs a forecast and then loads the stored series for it.
#[instrument(skip(api, form), fields(region = %form.region, days = form.days))]
pub async fn run_forecast<A>(api: &A, form: &ForecastForm) -> Result<ForecastRun, WorkflowError>
where
    A: PowercastApi + ?Sized,
{
    let request = form.to_request().inspect_err(|e| warn!("Forecast form rejected: {}", e))?;

    debug!("Running forecast for {} from {}", request.region, request.start_date);
    let created = api
        .run_forecast(&request)
        .await
        .inspect_err(|e| error!("Forecast run failed: {}", e))?;

    let record = api
        .forecast_detail(&created.forecast_id)
        .await
        .inspect_err(|e| error!("Failed to load forecast {}: {}", created.forecast_id, e))?;

    info!("Forecast {} produced {} points", created.forecast_id, record.values.len());
    Ok(ForecastRun {
        export_id: created.export_id.or(record.export_id),
        forecast_id: created.forecast_id,
        points: record.values,
    })
}

/// Filters of the forecast search page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastSearch {
    pub region: Option<String>,
    /// Inclusive range of calendar days.
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl ForecastSearch {
    /// Builds the query, with day bounds taken in `tz`.
    pub fn to_query<Tz: TimeZone>(&self, tz: &Tz) -> ForecastQuery {
        let mut query = ForecastQuery {
            region: self.region.clone().filter(|r| !r.is_empty()),
            ..Default::default()
        };
        if let Some((from, to)) = self.range {
            query.date_from = start_of_day(from, tz).map(|d| to_iso_instant(&d));
            query.date_to = end_of_day(to, tz).map(|d| to_iso_instant(&d));
        }
        query
    }
}

#[instrument(skip(api, tz))]
pub async fn search_forecasts<A, Tz>(
    api: &A,
    search: &ForecastSearch,
    tz: &Tz,
) -> crate::error::Result<Vec<ForecastSummary>>
where
    A: PowercastApi + ?Sized,
    Tz: TimeZone,
{
    let query = search.to_query(tz);
    debug!("Searching forecasts with {:?}", query.pairs());
    let items = api
        .search_forecasts(&query)
        .await
        .inspect_err(|e| error!("Forecast search failed: {}", e))?;
    info!("Found {} forecasts", items.len());
    Ok(items)
}

/// Cells of one search row: region, start, hours, latest.
pub fn summary_cells(item: &ForecastSummary) -> [String; 4] {
    [
        item.region.clone(),
        item.start_date.clone(),
        item.horizon_h.to_string(),
        if item.is_latest { "Yes" } else { "No" }.to_string(),
    ]
}
