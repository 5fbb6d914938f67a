//! In-memory [`PowercastApi`] used by the workflow tests.

use async_trait::async_trait;
use common::{
    ActualPoint, CoverageResponse, CoverageSummary, DataKind, ForecastQuery, ForecastRecord,
    ForecastSummary, ImportSummary, MapeReport, ModelInfo, RunForecastRequest,
    RunForecastResponse, TrainRequest, TrainResponse, UploadResponse,
};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::api::{PowercastApi, UploadFile};
use crate::error::Result;

/// Returns canned responses and records every call it receives.
pub struct MockApi {
    calls: RefCell<Vec<String>>,
    pub health: Result<serde_json::Value>,
    pub upload: Result<UploadResponse>,
    /// Import responses by file name; files not listed succeed with an empty summary.
    pub imports: HashMap<String, Result<ImportSummary>>,
    pub coverage: Result<CoverageResponse>,
    pub summary: Result<CoverageSummary>,
    pub train: Result<TrainResponse>,
    pub run: Result<RunForecastResponse>,
    pub detail: Result<ForecastRecord>,
    pub search: Result<Vec<ForecastSummary>>,
    pub actual: Result<Vec<ActualPoint>>,
    pub mape: Result<MapeReport>,
    pub models: Result<Vec<ModelInfo>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            health: Ok(serde_json::json!({"ok": true})),
            upload: Ok(UploadResponse::default()),
            imports: HashMap::new(),
            coverage: Ok(CoverageResponse::default()),
            summary: Ok(CoverageSummary::default()),
            train: Ok(TrainResponse::default()),
            run: Ok(RunForecastResponse {
                forecast_id: "f-new".into(),
                export_id: None,
                count: None,
            }),
            detail: Ok(ForecastRecord::default()),
            search: Ok(Vec::new()),
            actual: Ok(Vec::new()),
            mape: Ok(MapeReport::default()),
            models: Ok(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl PowercastApi for MockApi {
    async fn health(&self) -> Result<serde_json::Value> {
        self.record("GET /api/health".into());
        self.health.clone()
    }

    async fn upload_files(&self, files: &[UploadFile]) -> Result<UploadResponse> {
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        self.record(format!("POST /upload files={}", names.join(",")));
        self.upload.clone()
    }

    async fn import_file(&self, endpoint: &str, file: &UploadFile) -> Result<ImportSummary> {
        self.record(format!("POST {} file={}", endpoint, file.name));
        self.imports
            .get(&file.name)
            .cloned()
            .unwrap_or_else(|| Ok(ImportSummary::default()))
    }

    async fn coverage(&self, kind: DataKind) -> Result<CoverageResponse> {
        self.record(format!("GET /api/series/coverage type={}", kind));
        self.coverage.clone()
    }

    async fn coverage_summary(&self) -> Result<CoverageSummary> {
        self.record("GET /api/series/coverage/summary".into());
        self.summary.clone()
    }

    async fn start_training(&self, request: &TrainRequest) -> Result<TrainResponse> {
        self.record(format!("POST /api/train/start regions={}", request.regions.join(",")));
        self.train.clone()
    }

    async fn run_forecast(&self, request: &RunForecastRequest) -> Result<RunForecastResponse> {
        self.record(format!(
            "POST /api/forecast/run region={} start_date={} days={}",
            request.region, request.start_date, request.days
        ));
        self.run.clone()
    }

    async fn forecast_detail(&self, forecast_id: &str) -> Result<ForecastRecord> {
        self.record(format!("GET /api/forecast/{}", forecast_id));
        self.detail.clone()
    }

    async fn search_forecasts(&self, query: &ForecastQuery) -> Result<Vec<ForecastSummary>> {
        let pairs: Vec<String> = query
            .pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        self.record(format!("GET /api/forecast/search {}", pairs.join("&")));
        self.search.clone()
    }

    async fn actual_series(&self, region: &str, from: &str, to: &str) -> Result<Vec<ActualPoint>> {
        self.record(format!(
            "GET /api/series/actual region={} from={} to={}",
            region, from, to
        ));
        self.actual.clone()
    }

    async fn mape_for_forecast(&self, forecast_id: &str) -> Result<MapeReport> {
        self.record(format!(
            "GET /api/metrics/mape/for-forecast forecast_id={}",
            forecast_id
        ));
        self.mape.clone()
    }

    async fn list_models(&self, region: Option<&str>) -> Result<Vec<ModelInfo>> {
        self.record(format!("GET /api/model/list region={}", region.unwrap_or("")));
        self.models.clone()
    }

    fn export_url(&self, export_id: &str) -> String {
        format!("http://backend.test/api/forecast/export/{}", export_id)
    }
}
