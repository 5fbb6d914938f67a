use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use common::DataKind;
use std::path::PathBuf;

pub mod commands;

use crate::client::HttpApi;
use crate::config::Settings;
use commands::{data, forecasting, serve, training};

#[derive(Parser)]
#[command(name = "powercast")]
#[command(about = "PowerCast dev server and headless client for the forecasting backend")]
#[command(version)]
pub struct Cli {
    /// Backend base URL, overriding `powercast.toml` and `POWERCAST_BACKEND_URL`
    #[arg(short, long, global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the built frontend and proxy API calls to the backend
    Serve {
        /// Bind address for the dev server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:5173, 127.0.0.1:8080)
        #[arg(long)]
        bind_address: Option<String>,

        /// Directory holding the built frontend (`trunk build` output)
        #[arg(long)]
        dist_dir: Option<String>,
    },
    /// Check that the backend is up
    Health,
    /// Bulk-upload CSV files through the legacy `/upload` endpoint
    Upload {
        files: Vec<PathBuf>,
    },
    /// Import files of one category, one request per file
    Import {
        /// load, weather or holidays
        #[arg(short, long)]
        category: String,

        files: Vec<PathBuf>,
    },
    /// Show stored time ranges for a data category
    Coverage {
        #[arg(short, long, default_value = "load")]
        kind: DataKind,
    },
    /// Train models and wait for the result
    Train(TrainArgs),
    /// List trained models
    Models {
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Run a forecast and print its series
    Forecast {
        #[arg(short, long, default_value = common::DEFAULT_REGION)]
        region: String,

        /// Start as RFC 3339 or local `YYYY-MM-DDTHH:MM`
        #[arg(short, long)]
        start: String,

        #[arg(short, long, default_value_t = compute::forecast::MAX_DAYS)]
        days: u32,
    },
    /// Search stored forecasts
    Forecasts {
        #[arg(short, long)]
        region: Option<String>,

        /// First day, `YYYY-MM-DD`
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Last day, `YYYY-MM-DD`
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Compare a forecast with the measured load
    Evaluate {
        forecast_id: String,

        #[arg(short, long, default_value = common::DEFAULT_REGION)]
        region: String,
    },
}

/// Training form fields; unset values keep the form defaults.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Comma separated regions
    #[arg(long, value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Window start as RFC 3339 or local `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    pub from: Option<String>,

    /// Window end as RFC 3339 or local `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub layers: Option<u32>,
    #[arg(long)]
    pub hidden_size: Option<u32>,
    #[arg(long)]
    pub dropout: Option<f64>,
    #[arg(long)]
    pub epochs: Option<u32>,
    #[arg(long)]
    pub batch_size: Option<u32>,
    #[arg(long)]
    pub learning_rate: Option<f64>,
    #[arg(long)]
    pub input_window: Option<u32>,
    #[arg(long)]
    pub forecast_horizon: Option<u32>,
    #[arg(long)]
    pub teacher_forcing: Option<f64>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut settings = Settings::load()?;
        if let Some(backend_url) = self.backend_url {
            settings.backend_url = backend_url;
        }

        match self.command {
            Commands::Serve { bind_address, dist_dir } => {
                if let Some(bind_address) = bind_address {
                    settings.bind_address = bind_address;
                }
                if let Some(dist_dir) = dist_dir {
                    settings.dist_dir = dist_dir;
                }
                serve(&settings).await?;
            }
            command => {
                let api = HttpApi::from_settings(&settings)?;
                run_client(command, &api).await?;
            }
        }
        Ok(())
    }
}

/// Runs one headless command against the backend.
async fn run_client(command: Commands, api: &HttpApi) -> Result<()> {
    match command {
        Commands::Serve { .. } => anyhow::bail!("serve does not run against a client"),
        Commands::Health => data::health(api).await,
        Commands::Upload { files } => data::upload(api, &files).await,
        Commands::Import { category, files } => data::import(api, &category, &files).await,
        Commands::Coverage { kind } => data::coverage(api, kind).await,
        Commands::Train(args) => training::train(api, args).await,
        Commands::Models { region } => training::models(api, region.as_deref()).await,
        Commands::Forecast { region, start, days } => {
            forecasting::forecast(api, region, &start, days).await
        }
        Commands::Forecasts { region, from, to } => {
            forecasting::forecasts(api, region, from.as_deref(), to.as_deref()).await
        }
        Commands::Evaluate { forecast_id, region } => {
            forecasting::evaluate(api, &forecast_id, &region).await
        }
    }
}
