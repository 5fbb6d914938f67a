use serde::{Deserialize, Serialize};

/// Response of the legacy bulk upload endpoint (`POST /upload`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Time range of the rows written by an import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct TsRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Successful response of `POST /api/import/{load|weather|holidays}`.
///
/// Load and weather imports report `rows_hourly` and a `ts_range`; holiday
/// imports only report `rows` and the regions touched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ImportSummary {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub rows: Option<u64>,
    #[serde(default)]
    pub rows_input: Option<u64>,
    #[serde(default)]
    pub rows_hourly: Option<u64>,
    #[serde(default)]
    pub upserts: Option<u64>,
    #[serde(default)]
    pub modified: Option<u64>,
    #[serde(default)]
    pub ts_range: Option<TsRange>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl ImportSummary {
    /// Number of stored rows, whichever way the endpoint reports it.
    pub fn row_count(&self) -> Option<u64> {
        self.rows_hourly.or(self.rows)
    }

    /// Regions or locations the import touched.
    pub fn keys(&self) -> &[String] {
        if self.locations.is_empty() {
            &self.regions
        } else {
            &self.locations
        }
    }
}
