use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, instrument};

/// Largest request body forwarded to the backend (uploads included).
pub const MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

/// Headers that describe the hop rather than the message.
const HOP_HEADERS: [HeaderName; 4] = [
    header::HOST,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
];

#[derive(Clone, Debug)]
pub struct ProxyState {
    pub client: Client,
    /// Backend base URL without a trailing slash
    pub backend_url: String,
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("Backend unreachable: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("Failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!("Proxy error: {}", self);
        (StatusCode::BAD_GATEWAY, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in HOP_HEADERS {
        forwarded.remove(name);
    }
    forwarded
}

/// Forwards the request to the backend and relays its answer unchanged.
#[instrument(skip(state, request), fields(method = %request.method(), uri = %request.uri()))]
pub async fn proxy(State(state): State<ProxyState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", state.backend_url, path);
    let body = to_bytes(body, MAX_BODY_BYTES).await?;
    debug!("Forwarding {} {} ({} bytes)", parts.method, target, body.len());

    let upstream = state
        .client
        .request(parts.method, &target)
        .headers(forwarded_headers(&parts.headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwarded_headers(upstream.headers());
    let bytes = upstream.bytes().await?;
    debug!("Backend answered {} for {} ({} bytes)", status, target, bytes.len());

    let mut response = Response::builder().status(status).body(Body::from(bytes))?;
    response.headers_mut().extend(headers);
    Ok(response)
}
