use anyhow::{anyhow, Result};
use chrono::Local;
use compute::forecast::summary_cells;
use compute::timestamps::parse_input_date;
use compute::{
    evaluate_forecast, run_forecast, search_forecasts, EvaluationOutcome, ForecastForm,
    ForecastSearch, PowercastApi,
};
use tracing::debug;

use super::parse_instant;

pub async fn forecast<A: PowercastApi + ?Sized>(api: &A, region: String, start: &str, days: u32) -> Result<()> {
    let form = ForecastForm {
        region,
        start: Some(parse_instant(start)?),
        days,
    };
    let run = run_forecast(api, &form).await?;

    println!("{}", run.message());
    if let Some(export_id) = &run.export_id {
        println!("CSV: {}", api.export_url(export_id));
    }
    for point in &run.points {
        println!("{}\t{:.2}", point.ts, point.yhat);
    }
    Ok(())
}

/// Builds the search from optional day bounds, given as `YYYY-MM-DD`.
pub fn forecast_search(region: Option<String>, from: Option<&str>, to: Option<&str>) -> Result<ForecastSearch> {
    let day = |value: &str| parse_input_date(value).ok_or_else(|| anyhow!("Invalid date '{}'", value));
    let range = match (from, to) {
        (Some(from), Some(to)) => Some((day(from)?, day(to)?)),
        _ => None,
    };
    Ok(ForecastSearch { region, range })
}

pub async fn forecasts<A: PowercastApi + ?Sized>(
    api: &A,
    region: Option<String>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let search = forecast_search(region, from, to)?;
    let items = search_forecasts(api, &search, &Local).await?;
    if items.is_empty() {
        println!("No forecasts found.");
        return Ok(());
    }

    println!("Id\tRegion\tStart\tHours\tLatest\tExport");
    for item in &items {
        let export = item
            .export_id
            .as_deref()
            .map(|id| api.export_url(id))
            .unwrap_or_else(|| "-".to_string());
        println!("{}\t{}\t{}", item.id, summary_cells(item).join("\t"), export);
    }
    Ok(())
}

pub async fn evaluate<A: PowercastApi + ?Sized>(api: &A, forecast_id: &str, region: &str) -> Result<()> {
    match evaluate_forecast(api, forecast_id, region).await? {
        EvaluationOutcome::Empty => {
            debug!("Forecast {} has no values", forecast_id);
            println!("Forecast {} has no values.", forecast_id);
        }
        EvaluationOutcome::Ready(evaluation) => {
            println!("{}", evaluation.headline());
            println!("Range: {}", evaluation.mape_range());
            println!("Timestamp\tForecast\tActual");
            for point in &evaluation.series {
                let actual = point
                    .actual
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{:.2}\t{}", point.ts, point.forecast, actual);
            }
        }
    }
    Ok(())
}
