use serde::{Deserialize, Serialize};

use crate::models::ModelMetrics;

/// Hyperparameters of a training run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hyperparameters {
    pub model: String,
    pub layers: u32,
    pub hidden_size: u32,
    pub dropout: f64,
    pub epochs: u32,
    pub batch_size: u32,
    pub learning_rate: f64,
    pub input_window: u32,
    pub forecast_horizon: u32,
    pub teacher_forcing: f64,
}

/// Request body of `POST /api/train/start`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainRequest {
    pub regions: Vec<String>,
    pub date_from: String,
    pub date_to: String,
    pub hyper: Hyperparameters,
}

/// Outcome of training one region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrainResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub metrics: Option<ModelMetrics>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrainResponse {
    #[serde(default)]
    pub results: Vec<TrainResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_request_wire_shape() {
        let request = TrainRequest {
            regions: vec!["N.Y.C.".into()],
            date_from: "2024-01-01T00:00:00.000Z".into(),
            date_to: "2024-03-01T00:00:00.000Z".into(),
            hyper: Hyperparameters {
                model: "LSTM".into(),
                layers: 2,
                hidden_size: 128,
                dropout: 0.2,
                epochs: 10,
                batch_size: 64,
                learning_rate: 0.001,
                input_window: 168,
                forecast_horizon: 168,
                teacher_forcing: 0.2,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["regions"][0], "N.Y.C.");
        assert_eq!(value["hyper"]["model"], "LSTM");
        assert_eq!(value["hyper"]["forecast_horizon"], 168);
    }

    #[test]
    fn test_train_response_with_failed_region() {
        let json = r#"{"ok": true, "results": [
            {"ok": true, "region": "N.Y.C.", "model_id": "m1", "metrics": {"val_loss": 0.01, "test_mape": 3.2}},
            {"ok": false, "region": "WEST", "error": "not enough data"}
        ]}"#;
        let response: TrainResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[1].error.as_deref(), Some("not enough data"));
    }
}
