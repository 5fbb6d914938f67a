//! Client core of PowerCast.
//!
//! Workflows are written once against [`api::PowercastApi`] and run
//! unchanged in the browser, in the CLI and in tests.

pub mod api;
pub mod coverage;
pub mod error;
pub mod evaluation;
pub mod forecast;
pub mod health;
pub mod import;
pub mod models;
pub mod pagination;
pub mod timestamps;
pub mod training;
pub mod upload;

#[cfg(test)]
mod testing;

pub use api::{endpoints, PowercastApi, UploadFile, HEALTH_TIMEOUT_MS};
pub use coverage::{load_coverage, CoverageView};
pub use error::{ApiError, FormError, Result, WorkflowError};
pub use evaluation::{evaluate_forecast, merge_series, Evaluation, EvaluationOutcome, EvaluationPoint};
pub use forecast::{run_forecast, search_forecasts, ForecastForm, ForecastRun, ForecastSearch};
pub use health::check_health;
pub use import::{import_batch, import_endpoint, ImportLog, ImportOutcome, ImportResult};
pub use models::list_models;
pub use training::{submit_training, TrainForm};
pub use upload::{upload_selected, UploadOutcome};
