use anyhow::Result;
use chrono::Utc;
use compute::models::{model_cells, COLUMNS};
use compute::training::describe_result;
use compute::{list_models, submit_training, PowercastApi, TrainForm};
use tracing::info;

use super::parse_instant;
use crate::cli::TrainArgs;

/// Fills the training form from the command line, keeping form defaults
/// for anything not given.
pub fn train_form(args: TrainArgs) -> Result<TrainForm> {
    let defaults = TrainForm::default();
    let range = match (args.from.as_deref(), args.to.as_deref()) {
        (Some(from), Some(to)) => Some((
            parse_instant(from)?.with_timezone(&Utc),
            parse_instant(to)?.with_timezone(&Utc),
        )),
        _ => None,
    };

    Ok(TrainForm {
        regions: if args.regions.is_empty() { defaults.regions } else { args.regions },
        range,
        layers: args.layers.unwrap_or(defaults.layers),
        hidden_size: args.hidden_size.unwrap_or(defaults.hidden_size),
        dropout: args.dropout.unwrap_or(defaults.dropout),
        epochs: args.epochs.unwrap_or(defaults.epochs),
        batch_size: args.batch_size.unwrap_or(defaults.batch_size),
        learning_rate: args.learning_rate.unwrap_or(defaults.learning_rate),
        input_window: args.input_window.unwrap_or(defaults.input_window),
        forecast_horizon: args.forecast_horizon.unwrap_or(defaults.forecast_horizon),
        teacher_forcing: args.teacher_forcing.unwrap_or(defaults.teacher_forcing),
    })
}

pub async fn train<A: PowercastApi + ?Sized>(api: &A, args: TrainArgs) -> Result<()> {
    let form = train_form(args)?;
    println!("Training model... please wait");

    let response = submit_training(api, &form).await?;
    println!("Training finished and model saved!");
    for result in &response.results {
        println!("{}", describe_result(result));
    }
    info!("Training returned {} results", response.results.len());
    Ok(())
}

pub async fn models<A: PowercastApi + ?Sized>(api: &A, region: Option<&str>) -> Result<()> {
    let models = list_models(api, region).await?;
    if models.is_empty() {
        println!("No models found.");
        return Ok(());
    }
    println!("{}", COLUMNS.join("\t"));
    for model in &models {
        println!("{}", model_cells(model).join("\t"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TrainArgs {
        TrainArgs {
            regions: Vec::new(),
            from: None,
            to: None,
            layers: None,
            hidden_size: None,
            dropout: None,
            epochs: None,
            batch_size: None,
            learning_rate: None,
            input_window: None,
            forecast_horizon: None,
            teacher_forcing: None,
        }
    }

    #[test]
    fn test_unset_arguments_keep_form_defaults() {
        let form = train_form(args()).unwrap();
        assert_eq!(form, TrainForm::default());
    }

    #[test]
    fn test_arguments_override_form() {
        let form = train_form(TrainArgs {
            regions: vec!["WEST".into()],
            from: Some("2024-01-01T00:00:00Z".into()),
            to: Some("2024-02-01T00:00:00Z".into()),
            epochs: Some(3),
            ..args()
        })
        .unwrap();

        assert_eq!(form.regions, vec!["WEST".to_string()]);
        assert_eq!(form.epochs, 3);
        let request = form.to_request().unwrap();
        assert_eq!(request.date_from, "2024-01-01T00:00:00.000Z");
        assert_eq!(request.date_to, "2024-02-01T00:00:00.000Z");
    }

    #[test]
    fn test_half_range_is_missing() {
        let form = train_form(TrainArgs {
            from: Some("2024-01-01T00:00:00Z".into()),
            ..args()
        })
        .unwrap();
        assert!(form.range.is_none());
    }
}
