//! The boundary between the workflows and the forecasting backend.
//!
//! Every client (browser, CLI, tests) implements [`PowercastApi`]; the
//! workflows in this crate are written once against the trait.

use async_trait::async_trait;
use common::{
    ActualPoint, CoverageResponse, CoverageSummary, DataKind, ForecastQuery, ForecastRecord,
    ForecastSummary, ImportSummary, MapeReport, ModelInfo, RunForecastRequest,
    RunForecastResponse, TrainRequest, TrainResponse, UploadResponse,
};

use crate::error::Result;

/// Upper bound on the health check, the only call with a timeout.
pub const HEALTH_TIMEOUT_MS: u32 = 5000;

/// A file picked by the user, read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Backend paths, relative to the API base URL.
pub mod endpoints {
    pub const HEALTH: &str = "/api/health";
    pub const UPLOAD: &str = "/upload";
    pub const IMPORT_LOAD: &str = "/api/import/load";
    pub const IMPORT_WEATHER: &str = "/api/import/weather";
    pub const IMPORT_HOLIDAYS: &str = "/api/import/holidays";
    pub const COVERAGE: &str = "/api/series/coverage";
    pub const COVERAGE_SUMMARY: &str = "/api/series/coverage/summary";
    pub const ACTUAL: &str = "/api/series/actual";
    pub const TRAIN_START: &str = "/api/train/start";
    pub const FORECAST_RUN: &str = "/api/forecast/run";
    pub const FORECAST_SEARCH: &str = "/api/forecast/search";
    pub const MAPE_FOR_FORECAST: &str = "/api/metrics/mape/for-forecast";
    pub const MODEL_LIST: &str = "/api/model/list";

    /// Multipart field of the legacy bulk upload; repeated once per file.
    pub const UPLOAD_FIELD: &str = "files";
    /// Multipart field of the per-category import.
    pub const IMPORT_FIELD: &str = "file";

    pub fn forecast_detail(id: &str) -> String {
        format!("/api/forecast/{}", id)
    }

    pub fn forecast_export(export_id: &str) -> String {
        format!("/api/forecast/export/{}", export_id)
    }
}

/// Calls exposed by the forecasting backend.
///
/// Futures are not required to be `Send` so that browser implementations
/// can hold JS handles across awaits.
#[async_trait(?Send)]
pub trait PowercastApi {
    /// `GET /api/health`, bounded by [`HEALTH_TIMEOUT_MS`].
    async fn health(&self) -> Result<serde_json::Value>;

    /// `POST /upload` with every file under the repeated `files` field.
    async fn upload_files(&self, files: &[UploadFile]) -> Result<UploadResponse>;

    /// `POST` one file under the `file` field to an import endpoint.
    async fn import_file(&self, endpoint: &str, file: &UploadFile) -> Result<ImportSummary>;

    async fn coverage(&self, kind: DataKind) -> Result<CoverageResponse>;

    async fn coverage_summary(&self) -> Result<CoverageSummary>;

    /// Blocks until the backend has finished training.
    async fn start_training(&self, request: &TrainRequest) -> Result<TrainResponse>;

    async fn run_forecast(&self, request: &RunForecastRequest) -> Result<RunForecastResponse>;

    async fn forecast_detail(&self, forecast_id: &str) -> Result<ForecastRecord>;

    async fn search_forecasts(&self, query: &ForecastQuery) -> Result<Vec<ForecastSummary>>;

    async fn actual_series(&self, region: &str, from: &str, to: &str) -> Result<Vec<ActualPoint>>;

    async fn mape_for_forecast(&self, forecast_id: &str) -> Result<MapeReport>;

    async fn list_models(&self, region: Option<&str>) -> Result<Vec<ModelInfo>>;

    /// Download link for an exported forecast CSV. Never fetched by the client.
    fn export_url(&self, export_id: &str) -> String;
}
