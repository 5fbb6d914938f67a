use serde::{Deserialize, Serialize};

/// One row of `GET /api/series/coverage`.
///
/// Load and holiday rows are keyed by `region`, weather rows by `location`.
/// Hourly series report `hours`, the daily holiday series reports `days`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CoverageRow {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub hours: Option<u64>,
    #[serde(default)]
    pub days: Option<u64>,
}

impl CoverageRow {
    pub fn key(&self) -> &str {
        self.region
            .as_deref()
            .or(self.location.as_deref())
            .unwrap_or_default()
    }

    pub fn count(&self) -> Option<u64> {
        self.hours.or(self.days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CoverageResponse {
    #[serde(default)]
    pub coverage: Vec<CoverageRow>,
}

/// Summary of one stored category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CoverageSummaryEntry {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub hours: Option<u64>,
    #[serde(default)]
    pub days: Option<u64>,
    #[serde(default)]
    pub keys: u64,
}

impl CoverageSummaryEntry {
    pub fn count(&self) -> u64 {
        self.hours.or(self.days).unwrap_or(0)
    }
}

/// Response of `GET /api/series/coverage/summary`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CoverageSummary {
    #[serde(default)]
    pub load: Option<CoverageSummaryEntry>,
    #[serde(default)]
    pub weather: Option<CoverageSummaryEntry>,
    #[serde(default)]
    pub holidays: Option<CoverageSummaryEntry>,
}
