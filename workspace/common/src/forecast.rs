use serde::{Deserialize, Serialize};

// ===================== Forecast runs =====================

/// Request body of `POST /api/forecast/run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunForecastRequest {
    pub region: String,
    pub start_date: String,
    pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunForecastResponse {
    pub forecast_id: String,
    #[serde(default)]
    pub export_id: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// One predicted value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub ts: String,
    pub yhat: f64,
}

/// Stored forecast document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub horizon_h: Option<u32>,
    #[serde(default)]
    pub is_latest: bool,
    #[serde(default)]
    pub values: Vec<ForecastPoint>,
    #[serde(default)]
    pub export_id: Option<String>,
}

/// Response of `GET /api/forecast/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDetailResponse {
    pub forecast: ForecastRecord,
}

// ===================== Forecast search =====================

/// Query of `GET /api/forecast/search`. Absent fields are left out of the
/// query string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl ForecastQuery {
    /// Query string pairs in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(region) = &self.region {
            pairs.push(("region", region.clone()));
        }
        if let Some(date_from) = &self.date_from {
            pairs.push(("date_from", date_from.clone()));
        }
        if let Some(date_to) = &self.date_to {
            pairs.push(("date_to", date_to.clone()));
        }
        pairs
    }
}

/// One row of the forecast search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub region: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub horizon_h: u32,
    #[serde(default)]
    pub is_latest: bool,
    #[serde(default)]
    pub export_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastSearchResponse {
    #[serde(default)]
    pub items: Vec<ForecastSummary>,
}

// ===================== Actuals and accuracy =====================

/// One measured load value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActualPoint {
    pub ts: String,
    pub load_mw: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ActualSeriesResponse {
    #[serde(default)]
    pub items: Vec<ActualPoint>,
}

/// Response of `GET /api/metrics/mape/for-forecast`.
///
/// `mape` is null when no actual value overlaps the forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MapeReport {
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub mape: Option<f64>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}
