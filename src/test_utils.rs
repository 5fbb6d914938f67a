//! In-process fake of the forecasting backend and helpers for router tests.

use axum::{
    body::Bytes,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::Settings;

/// Initialize tracing for tests with output to STDERR.
///
/// The level comes from `RUST_LOG`, defaulting to WARN.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "up" }))
}

async fn slow_health() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!({ "status": "late" }))
}

/// Counts the `files` parts without parsing the multipart body.
async fn upload(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let is_multipart = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));
    if !is_multipart {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Expected multipart body" })));
    }
    let text = String::from_utf8_lossy(&body);
    let inserted = text.matches("name=\"files\"").count() * 24;
    (StatusCode::OK, Json(json!({ "inserted": inserted })))
}

async fn import_load(body: Bytes) -> impl IntoResponse {
    let text = String::from_utf8_lossy(&body);
    if text.contains("filename=\"broken.csv\"") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "ok": false, "error": "Missing columns" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "regions": ["N.Y.C."],
            "rows_input": 288,
            "rows_hourly": 24,
            "ts_range": { "from": "2024-01-01T00:00:00", "to": "2024-01-01T23:00:00" }
        })),
    )
}

async fn coverage(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("type").map(String::as_str) {
        Some("weather") => Json(json!({ "coverage": [] })),
        _ => Json(json!({
            "coverage": [
                { "region": "N.Y.C.", "from": "2024-01-01T00:00:00", "to": "2024-01-31T23:00:00", "hours": 744 }
            ]
        })),
    }
}

async fn coverage_summary() -> Json<Value> {
    Json(json!({
        "load": { "exists": true, "from": "2024-01-01", "to": "2024-01-31", "hours": 744, "keys": 1 },
        "weather": { "exists": false }
    }))
}

async fn train(Json(body): Json<Value>) -> Json<Value> {
    let results: Vec<Value> = body["regions"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|region| {
            json!({
                "ok": true,
                "region": region,
                "model_id": "m-1",
                "metrics": { "val_loss": 0.01234, "test_mape": 4.5 }
            })
        })
        .collect();
    Json(json!({ "ok": true, "results": results }))
}

async fn slow_train(body: Json<Value>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(1500)).await;
    train(body).await
}

async fn run_forecast(Json(body): Json<Value>) -> impl IntoResponse {
    if body["region"] == "NOWHERE" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "No model for region. Train first." })),
        );
    }
    (StatusCode::OK, Json(json!({ "ok": true, "forecast_id": "f1", "export_id": "e1" })))
}

async fn forecast_detail(axum::extract::Path(id): axum::extract::Path<String>) -> impl IntoResponse {
    match id.as_str() {
        "f1" => (
            StatusCode::OK,
            Json(json!({
                "forecast": {
                    "_id": "f1",
                    "region": "N.Y.C.",
                    "values": [
                        { "ts": "Mon, 01 Jan 2024 00:00:00 GMT", "yhat": 5.0 },
                        { "ts": "Mon, 01 Jan 2024 01:00:00 GMT", "yhat": 7.0 }
                    ]
                }
            })),
        ),
        "empty" => (StatusCode::OK, Json(json!({ "forecast": { "_id": "empty", "values": [] } }))),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "Forecast not found" }))),
    }
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let region = params.get("region").cloned().unwrap_or_else(|| "N.Y.C.".to_string());
    Json(json!({
        "items": [
            {
                "_id": "f1",
                "region": region,
                "start_date": params.get("date_from").cloned().unwrap_or_else(|| "2024-01-01T00:00:00".to_string()),
                "horizon_h": 168,
                "is_latest": true,
                "export_id": "e1"
            }
        ]
    }))
}

async fn actual(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let (Some(region), Some(_), Some(_)) = (params.get("region"), params.get("from"), params.get("to")) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "region, from, to are required" })));
    };
    (
        StatusCode::OK,
        Json(json!({
            "region": region,
            "items": [ { "ts": "Mon, 01 Jan 2024 00:00:00 GMT", "load_mw": 4.5 } ]
        })),
    )
}

async fn mape() -> Json<Value> {
    Json(json!({ "points": 1, "mape": 11.1111, "from": "2024-01-01T00:00:00", "to": "2024-01-01T00:00:00" }))
}

async fn models(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let region = params.get("region").cloned().unwrap_or_default();
    Json(json!({
        "models": [
            {
                "region": region,
                "algo": "LSTM",
                "train_range": { "from": "2023-01-01", "to": "2023-12-31" },
                "metrics": { "val_loss": 0.0123456, "test_mape": 3.21 },
                "created_at": "2024-01-02T00:00:00"
            }
        ]
    }))
}

/// Router answering like the forecasting backend.
pub fn fake_backend() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/upload", post(upload))
        .route("/api/import/load", post(import_load))
        .route("/api/series/coverage", get(coverage))
        .route("/api/series/coverage/summary", get(coverage_summary))
        .route("/api/series/actual", get(actual))
        .route("/api/train/start", post(train))
        .route("/api/forecast/run", post(run_forecast))
        .route("/api/forecast/search", get(search))
        .route("/api/forecast/:id", get(forecast_detail))
        .route("/api/metrics/mape/for-forecast", get(mape))
        .route("/api/model/list", get(models))
}

/// Backend whose health check outlasts any sensible timeout.
pub fn slow_backend() -> Router {
    Router::new().route("/api/health", get(slow_health))
}

/// Backend whose training takes longer than a second.
pub fn slow_training_backend() -> Router {
    Router::new().route("/api/train/start", post(slow_train))
}

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("Fake backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Fake backend crashed");
    });
    format!("http://{}", addr)
}

/// Directory with a minimal built frontend.
pub fn dist_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("powercast-dist-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create dist dir");
    std::fs::write(dir.join("index.html"), "<html><body>PowerCast</body></html>")
        .expect("Failed to write index.html");
    std::fs::write(dir.join("app.js"), "console.log('powercast');").expect("Failed to write app.js");
    dir
}

pub fn test_settings(backend_url: &str, dist_dir: &std::path::Path) -> Settings {
    Settings {
        backend_url: backend_url.to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        dist_dir: dist_dir.to_string_lossy().into_owned(),
        health_timeout_ms: 200,
    }
}
