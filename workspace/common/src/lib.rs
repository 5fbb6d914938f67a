//! Common transport-layer types shared between the PowerCast frontend and the CLI.
//! These structs mirror the forecasting backend's request/response payloads so
//! every client can deserialize API responses without duplicating shapes.
//!
//! The backend wraps most payloads in an envelope that also carries an `ok`
//! flag and a few diagnostic fields. Unknown fields are ignored and absent
//! collections default to empty.

mod coverage;
mod forecast;
mod import;
mod models;
mod training;

pub use coverage::{CoverageResponse, CoverageRow, CoverageSummary, CoverageSummaryEntry};
pub use forecast::{
    ActualPoint, ActualSeriesResponse, ForecastDetailResponse, ForecastPoint, ForecastQuery,
    ForecastRecord, ForecastSearchResponse, ForecastSummary, MapeReport, RunForecastRequest,
    RunForecastResponse,
};
pub use import::{ImportSummary, TsRange, UploadResponse};
pub use models::{ModelInfo, ModelListResponse, ModelMetrics, TrainRange};
pub use training::{Hyperparameters, TrainRequest, TrainResponse, TrainResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Load zones known to the backend.
pub const REGIONS: [&str; 11] = [
    "N.Y.C.", "LONGIL", "CAPITL", "CENTRL", "DUNWOD", "GENESE", "HUD VL", "MHK VL", "MILLWD",
    "NORTH", "WEST",
];

/// Region preselected on pages that need one.
pub const DEFAULT_REGION: &str = "N.Y.C.";

/// Error body returned by the backend on any failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub ok: Option<bool>,
}

// ===================== Data categories =====================

/// Category of stored observations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Load,
    Weather,
    Holidays,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [DataKind::Load, DataKind::Weather, DataKind::Holidays];

    /// Wire value used in paths and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Load => "load",
            DataKind::Weather => "weather",
            DataKind::Holidays => "holidays",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataKind::Load => "Load",
            DataKind::Weather => "Weather",
            DataKind::Holidays => "Holidays",
        }
    }

    /// Name of the field that keys a coverage row.
    pub fn key_noun(&self) -> &'static str {
        match self {
            DataKind::Weather => "location",
            DataKind::Load | DataKind::Holidays => "region",
        }
    }

    /// Holidays are stored per day, everything else per hour.
    pub fn is_daily(&self) -> bool {
        matches!(self, DataKind::Holidays)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(DataKind::Load),
            "weather" => Ok(DataKind::Weather),
            "holidays" => Ok(DataKind::Holidays),
            other => Err(format!("unknown data category '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_kind_round_trips_through_strings() {
        for kind in DataKind::ALL {
            assert_eq!(kind.as_str().parse::<DataKind>(), Ok(kind));
        }
        assert!("solar".parse::<DataKind>().is_err());
        assert!("Load".parse::<DataKind>().is_err());
    }

    #[test]
    fn test_data_kind_serializes_lowercase() {
        let json = serde_json::to_string(&DataKind::Holidays).unwrap();
        assert_eq!(json, "\"holidays\"");
    }

    #[test]
    fn test_error_body_ignores_envelope_fields() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"ok": false, "error": "days must be 1..7", "extra": 1}"#)
                .unwrap();
        assert_eq!(body.error, "days must be 1..7");
        assert_eq!(body.ok, Some(false));
    }

    #[test]
    fn test_default_region_is_known() {
        assert!(REGIONS.contains(&DEFAULT_REGION));
    }
}
