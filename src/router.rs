use anyhow::Result;
use axum::{
    routing::{any, get_service},
    Router,
};
use reqwest::Client;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::proxy::{proxy, ProxyState};

/// Dev server: the built frontend with client-side routing, plus the backend
/// behind `/api` and `POST /upload`.
pub fn create_router(settings: &Settings) -> Result<Router> {
    let state = ProxyState {
        client: Client::builder().build()?,
        backend_url: settings.backend_base().to_string(),
    };

    let dist = Path::new(&settings.dist_dir);
    let spa = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));

    let router = Router::new()
        .route("/api/*rest", any(proxy))
        // `/upload` is also a page of the app
        .route("/upload", get_service(spa.clone()).post(proxy))
        .fallback_service(spa)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);
    Ok(router)
}
