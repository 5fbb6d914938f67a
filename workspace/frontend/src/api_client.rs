pub mod files;

use async_trait::async_trait;
use common::{
    ActualPoint, ActualSeriesResponse, CoverageResponse, CoverageSummary, DataKind,
    ForecastDetailResponse, ForecastQuery, ForecastRecord, ForecastSearchResponse,
    ForecastSummary, ImportSummary, MapeReport, ModelInfo, ModelListResponse, RunForecastRequest,
    RunForecastResponse, TrainRequest, TrainResponse, UploadResponse,
};
use compute::{endpoints, ApiError, PowercastApi, Result, UploadFile};
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::AbortController;

use crate::settings;

/// [`PowercastApi`] over `fetch`, as seen from the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct GlooApi {
    base_url: String,
    health_timeout_ms: u32,
}

impl GlooApi {
    pub fn new(base_url: impl Into<String>, health_timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            health_timeout_ms,
        }
    }

    /// Client configured from the global settings.
    pub fn from_settings() -> Self {
        let settings = settings::get_settings();
        Self::new(settings.api_url, settings.health_timeout_ms)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn transport(method: &str, endpoint: &str, err: impl std::fmt::Display) -> ApiError {
    let err = ApiError::Transport(err.to_string());
    log::error!("{} {} - {}", method, endpoint, err);
    err
}

/// Turns a response into `T`, or into the backend's error.
async fn decode<T>(method: &str, endpoint: &str, response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    if !response.ok() {
        let status = response.status();
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, status);
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, &body));
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data = response.json::<T>().await.map_err(|e| {
        let err = ApiError::Decode(e.to_string());
        log::error!("{} {} - {}", method, endpoint, err);
        err
    })?;
    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}

impl GlooApi {
    async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        log::debug!("GET request to: {} {:?}", url, query);
        let response = Request::get(&url)
            .query(query.iter().map(|(k, v)| (*k, v.as_str())))
            .send()
            .await
            .map_err(|e| transport("GET", endpoint, e))?;
        decode("GET", endpoint, response).await
    }

    async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize,
    {
        let url = self.url(endpoint);
        log::debug!("POST request to: {}", url);
        let response = Request::post(&url)
            .json(body)
            .map_err(|e| transport("POST", endpoint, e))?
            .send()
            .await
            .map_err(|e| transport("POST", endpoint, e))?;
        decode("POST", endpoint, response).await
    }

    async fn post_multipart<T>(&self, endpoint: &str, field: &str, files: &[UploadFile]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        log::debug!("POST multipart to: {} ({} files)", url, files.len());
        let form = files::form_data(field, files).map_err(|e| transport("POST", endpoint, e))?;
        let response = Request::post(&url)
            .body(form)
            .map_err(|e| transport("POST", endpoint, e))?
            .send()
            .await
            .map_err(|e| transport("POST", endpoint, e))?;
        decode("POST", endpoint, response).await
    }
}

#[async_trait(?Send)]
impl PowercastApi for GlooApi {
    async fn health(&self) -> Result<serde_json::Value> {
        let endpoint = endpoints::HEALTH;
        let timeout_ms = self.health_timeout_ms;
        let controller =
            AbortController::new().map_err(|e| transport("GET", endpoint, format!("{:?}", e)))?;

        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let timed_out = timed_out.clone();
            Timeout::new(timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let signal = controller.signal();
        let sent = Request::get(&self.url(endpoint))
            .abort_signal(Some(&signal))
            .send()
            .await;
        drop(timer);

        let response = match sent {
            Ok(response) => response,
            Err(_) if timed_out.get() => {
                log::error!("GET {} - timed out after {} ms", endpoint, timeout_ms);
                return Err(ApiError::Timeout(timeout_ms));
            }
            Err(e) => return Err(transport("GET", endpoint, e)),
        };
        decode("GET", endpoint, response).await
    }

    async fn upload_files(&self, files: &[UploadFile]) -> Result<UploadResponse> {
        self.post_multipart(endpoints::UPLOAD, endpoints::UPLOAD_FIELD, files)
            .await
    }

    async fn import_file(&self, endpoint: &str, file: &UploadFile) -> Result<ImportSummary> {
        self.post_multipart(endpoint, endpoints::IMPORT_FIELD, std::slice::from_ref(file))
            .await
    }

    async fn coverage(&self, kind: DataKind) -> Result<CoverageResponse> {
        self.get(endpoints::COVERAGE, &[("type", kind.as_str().to_string())])
            .await
    }

    async fn coverage_summary(&self) -> Result<CoverageSummary> {
        self.get(endpoints::COVERAGE_SUMMARY, &[]).await
    }

    async fn start_training(&self, request: &TrainRequest) -> Result<TrainResponse> {
        self.post_json(endpoints::TRAIN_START, request).await
    }

    async fn run_forecast(&self, request: &RunForecastRequest) -> Result<RunForecastResponse> {
        self.post_json(endpoints::FORECAST_RUN, request).await
    }

    async fn forecast_detail(&self, forecast_id: &str) -> Result<ForecastRecord> {
        let response: ForecastDetailResponse =
            self.get(&endpoints::forecast_detail(forecast_id), &[]).await?;
        Ok(response.forecast)
    }

    async fn search_forecasts(&self, query: &ForecastQuery) -> Result<Vec<ForecastSummary>> {
        let response: ForecastSearchResponse =
            self.get(endpoints::FORECAST_SEARCH, &query.pairs()).await?;
        Ok(response.items)
    }

    async fn actual_series(&self, region: &str, from: &str, to: &str) -> Result<Vec<ActualPoint>> {
        let query = [
            ("region", region.to_string()),
            ("from", from.to_string()),
            ("to", to.to_string()),
        ];
        let response: ActualSeriesResponse = self.get(endpoints::ACTUAL, &query).await?;
        Ok(response.items)
    }

    async fn mape_for_forecast(&self, forecast_id: &str) -> Result<MapeReport> {
        self.get(
            endpoints::MAPE_FOR_FORECAST,
            &[("forecast_id", forecast_id.to_string())],
        )
        .await
    }

    async fn list_models(&self, region: Option<&str>) -> Result<Vec<ModelInfo>> {
        let query: Vec<(&str, String)> = region
            .map(|r| vec![("region", r.to_string())])
            .unwrap_or_default();
        let response: ModelListResponse = self.get(endpoints::MODEL_LIST, &query).await?;
        Ok(response.models)
    }

    fn export_url(&self, export_id: &str) -> String {
        self.url(&endpoints::forecast_export(export_id))
    }
}
