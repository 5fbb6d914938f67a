use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::router::create_router;

pub async fn serve(settings: &Settings) -> Result<()> {
    info!("PowerCast dev server starting up");
    debug!("Backend URL: {}", settings.backend_base());
    debug!("Serving frontend from {}", settings.dist_dir);

    if !std::path::Path::new(&settings.dist_dir).join("index.html").exists() {
        warn!(
            "No index.html in {}; build the frontend with `trunk build` first",
            settings.dist_dir
        );
    }

    let app = create_router(settings)?;

    let listener = match TcpListener::bind(&settings.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", settings.bind_address, e);
            return Err(e.into());
        }
    };

    info!("PowerCast running on http://{}", settings.bind_address);
    info!("Proxying /api and /upload to {}", settings.backend_base());

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
