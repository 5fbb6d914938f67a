use async_trait::async_trait;
use common::{
    ActualPoint, ActualSeriesResponse, CoverageResponse, CoverageSummary, DataKind,
    ForecastDetailResponse, ForecastQuery, ForecastRecord, ForecastSearchResponse,
    ForecastSummary, ImportSummary, MapeReport, ModelInfo, ModelListResponse, RunForecastRequest,
    RunForecastResponse, TrainRequest, TrainResponse, UploadResponse,
};
use compute::{endpoints, ApiError, PowercastApi, Result, UploadFile};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Settings;

/// [`PowercastApi`] over `reqwest`, used by the headless commands.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    health_timeout_ms: u32,
}

impl HttpApi {
    /// Only the health call is time-bounded; training blocks until the backend answers.
    pub fn new(base_url: impl Into<String>, health_timeout_ms: u32) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout_ms,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.backend_base(),
            settings.health_timeout_ms,
        )
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    #[instrument(skip(self, request), fields(base = %self.base_url))]
    async fn send<T>(&self, method: &str, endpoint: &str, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("{} {}", method, endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| transport(method, endpoint, e))?;
        decode(method, endpoint, response).await
    }

    async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(endpoint)).query(query);
        self.send("GET", endpoint, request).await
    }

    async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize,
    {
        let request = self.client.post(self.url(endpoint)).json(body);
        self.send("POST", endpoint, request).await
    }

    async fn post_multipart<T>(&self, endpoint: &str, field: &str, files: &[UploadFile]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
            form = form.part(field.to_string(), part);
        }
        let request = self.client.post(self.url(endpoint)).multipart(form);
        self.send("POST", endpoint, request).await
    }
}

fn transport(method: &str, endpoint: &str, err: reqwest::Error) -> ApiError {
    let err = ApiError::Transport(err.to_string());
    error!("{} {} - {}", method, endpoint, err);
    err
}

/// Turns a response into `T`, or into the backend's error.
async fn decode<T>(method: &str, endpoint: &str, response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        warn!("{} {} - Non-OK response: {}", method, endpoint, status);
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status.as_u16(), &body));
    }

    let data = response.json::<T>().await.map_err(|e| {
        let err = ApiError::Decode(e.to_string());
        error!("{} {} - {}", method, endpoint, err);
        err
    })?;
    info!("{} {} - Success", method, endpoint);
    Ok(data)
}

#[async_trait(?Send)]
impl PowercastApi for HttpApi {
    async fn health(&self) -> Result<serde_json::Value> {
        let endpoint = endpoints::HEALTH;
        let timeout_ms = self.health_timeout_ms;
        debug!("GET {} (timeout {} ms)", endpoint, timeout_ms);
        let sent = self
            .client
            .get(self.url(endpoint))
            .timeout(Duration::from_millis(u64::from(timeout_ms)))
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                error!("GET {} - timed out after {} ms", endpoint, timeout_ms);
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
