use tracing::{debug, error, info, instrument};

use crate::api::PowercastApi;
use crate::error::Result;

/// Pings the backend and renders its status object verbatim.
#[instrument(skip(api))]
pub async fn check_health<A>(api: &A) -> Result<String>
where
    A: PowercastApi + ?Sized,
{
    debug!("Checking backend health");
    let status = api.health().await.inspect_err(|e| error!("Health check failed: {}", e))?;
    info!("Backend healthy");
    Ok(format!("Backend OK: {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;

    #[tokio::test]
    async fn test_status_is_shown_verbatim() {
        let mut api = MockApi::default();
        api.health = Ok(serde_json::json!({"status": "up"}));
        let line = check_health(&api).await.unwrap();
        assert_eq!(line, r#"Backend OK: {"status":"up"}"#);
        assert_eq!(api.calls(), vec!["GET /api/health".to_string()]);
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let mut api = MockApi::default();
        api.health = Err(ApiError::Timeout(5000));
        let err = check_health(&api).await.unwrap_err();
        assert_eq!(err.to_string(), "Request timed out after 5000 ms");
    }
}
