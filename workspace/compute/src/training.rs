use chrono::{DateTime, Utc};
use common::{Hyperparameters, TrainRequest, TrainResponse, TrainResult};
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::api::PowercastApi;
use crate::error::{FormError, WorkflowError};
use crate::timestamps::to_iso_instant;

/// Model family sent with every training request.
pub const MODEL_FAMILY: &str = "LSTM";

/// Training form as filled in by the user.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct TrainForm {
    #[validate(length(min = 1, message = "Select at least one region."))]
    pub regions: Vec<String>,
    /// Training window; both ends inclusive.
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    #[validate(range(min = 1, max = 4, message = "Layers must be between 1 and 4."))]
    pub layers: u32,
    #[validate(range(min = 16, max = 512, message = "Hidden size must be between 16 and 512."))]
    pub hidden_size: u32,
    #[validate(range(min = 0.0, max = 0.9, message = "Dropout must be between 0 and 0.9."))]
    pub dropout: f64,
    #[validate(range(min = 1, max = 200, message = "Epochs must be between 1 and 200."))]
    pub epochs: u32,
    #[validate(range(min = 8, max = 512, message = "Batch size must be between 8 and 512."))]
    pub batch_size: u32,
    #[validate(range(
        min = 0.00001,
        max = 0.1,
        message = "Learning rate must be between 0.00001 and 0.1."
    ))]
    pub learning_rate: f64,
    #[validate(range(min = 24, max = 336, message = "Input window must be between 24 and 336 hours."))]
    pub input_window: u32,
    #[validate(range(min = 24, max = 168, message = "Horizon must be between 24 and 168 hours."))]
    pub forecast_horizon: u32,
    #[validate(range(min = 0.0, max = 1.0, message = "Teacher forcing must be between 0 and 1."))]
    pub teacher_forcing: f64,
}

impl Default for TrainForm {
    fn default() -> Self {
        Self {
            regions: vec!["N.Y.C.".to_string(), "LONGIL".to_string()],
            range: None,
            layers: 2,
            hidden_size: 128,
            dropout: 0.2,
            epochs: 10,
            batch_size: 64,
            learning_rate: 0.001,
            input_window: 168,
            forecast_horizon: 168,
            teacher_forcing: 0.2,
        }
    }
}

impl TrainForm {
    /// Checks the form and builds the request body.
    pub fn to_request(&self) -> Result<TrainRequest, FormError> {
        let Some((from, to)) = self.range else {
            return Err(FormError::Missing("Please select a date range."));
        };

        // Range checks accept NaN.
        let non_finite: Vec<&str> = [
            ("Dropout", self.dropout),
            ("Learning rate", self.learning_rate),
            ("Teacher forcing", self.teacher_forcing),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(label, _)| label)
        .collect();
        if !non_finite.is_empty() {
            warn!("Non-finite training inputs: {:?}", non_finite);
            return Err(FormError::Invalid(format!(
                "{} must be a finite number.",
                non_finite.join(", ")
            )));
        }

        if let Err(errors) = self.validate() {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{} is invalid", field))
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
            messages.sort();
            return Err(FormError::Invalid(messages.join(" ")));
        }

        Ok(TrainRequest {
            regions: self.regions.clone(),
            date_from: to_iso_instant(&from),
            date_to: to_iso_instant(&to),
            hyper: Hyperparameters {
                model: MODEL_FAMILY.to_string(),
                layers: self.layers,
                hidden_size: self.hidden_size,
                dropout: self.dropout,
                epochs: self.epochs,
                batch_size: self.batch_size,
                learning_rate: self.learning_rate,
                input_window: self.input_window,
                forecast_horizon: self.forecast_horizon,
                teacher_forcing: self.teacher_forcing,
            },
        })
    }
}

/// `value` as a count field, or `None` when it is not a whole non-negative number.
pub fn whole_number(value: f64) -> Option<u32> {
    let in_range = value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX);
    (in_range && value.fract() == 0.0).then_some(value as u32)
}

/// One line per trained region.
pub fn describe_result(result: &TrainResult) -> String {
    let region = result.region.as_deref().unwrap_or("?");
    if !result.ok {
        return format!("{}: failed ({})", region, result.error.as_deref().unwrap_or("unknown error"));
    }
    let mut line = format!("{}: model {}", region, result.model_id.as_deref().unwrap_or("-"));
    if let Some(metrics) = &result.metrics {
        if let Some(val_loss) = metrics.val_loss {
            line.push_str(&format!(", val_loss {:.4}", val_loss));
        }
        if let Some(mape) = metrics.test_mape {
            line.push_str(&format!(", test MAPE {:.2}%", mape));
        }
    }
    line
}

/// Validates the form and waits for the backend to finish training.
#[instrument(skip(api, form), fields(regions = form.regions.len()))]
pub async fn submit_training<A>(api: &A, form: &TrainForm) -> Result<TrainResponse, WorkflowError>
where
    A: PowercastApi + ?Sized,
{
    let request = form.to_request().inspect_err(|e| {
        warn!("Training form rejected: {}", e);
    })?;

    debug!(
        "Starting training for {:?} from {} to {}",
        request.regions, request.date_from, request.date_to
    );
    let response = api.start_training(&request).await.inspect_err(|e| {
        error!("Training request failed: {}", e);
    })?;

    info!("Training finished with {} results", response.results.len());
    Ok(response)
}
