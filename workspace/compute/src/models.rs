use common::ModelInfo;
use tracing::{debug, error, info, instrument};

use crate::api::PowercastApi;
use crate::error::Result;

pub const COLUMNS: [&str; 7] = [
    "Region",
    "Algo",
    "Train From",
    "Train To",
    "Val Loss",
    "Test MAPE",
    "Created",
];

fn metric(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

/// Cells of one models-table row, matching [`COLUMNS`].
pub fn model_cells(model: &ModelInfo) -> [String; 7] {
    let range = model.train_range.as_ref();
    let metrics = model.metrics.as_ref();
    [
        model.region.clone(),
        model.algo.clone(),
        range.and_then(|r| r.from.clone()).unwrap_or_default(),
        range.and_then(|r| r.to.clone()).unwrap_or_default(),
        metric(metrics.and_then(|m| m.val_loss)),
        metric(metrics.and_then(|m| m.test_mape)),
        model.created_at.clone().unwrap_or_default(),
    ]
}

#[instrument(skip(api))]
pub async fn list_models<A>(api: &A, region: Option<&str>) -> Result<Vec<ModelInfo>>
where
    A: PowercastApi + ?Sized,
{
    debug!("Listing models for {:?}", region);
    let models = api
        .list_models(region)
        .await
        .inspect_err(|e| error!("Failed to list models: {}", e))?;
    info!("Loaded {} models", models.len());
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use common::{ModelMetrics, TrainRange};

    #[test]
    fn test_cells_with_and_without_metrics() {
        let model = ModelInfo {
            region: "N.Y.C.".into(),
            algo: "LSTM".into(),
            train_range: Some(TrainRange {
                from: Some("2023-01-01T00:00:00".into()),
                to: Some("2023-06-30T23:00:00".into()),
            }),
            metrics: Some(ModelMetrics {
                val_loss: Some(0.012345),
                test_mape: None,
            }),
            created_at: Some("2024-02-01T10:00:00".into()),
        };
        assert_eq!(
            model_cells(&model),
            [
                "N.Y.C.".to_string(),
                "LSTM".into(),
                "2023-01-01T00:00:00".into(),
                "2023-06-30T23:00:00".into(),
                "0.0123".into(),
                "".into(),
                "2024-02-01T10:00:00".into(),
            ]
        );
    }

    #[tokio::test]
    async fn test_region_is_forwarded() {
        let api = MockApi::default();
        list_models(&api, Some("WEST")).await.unwrap();
        list_models(&api, None).await.unwrap();
        assert_eq!(
            api.calls(),
            vec!["GET /api/model/list region=WEST".to_string(), "GET /api/model/list region=".to_string()]
        );
    }
}
