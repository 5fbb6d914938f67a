use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod client;
mod config;
mod proxy;
mod router;

#[cfg(test)]
mod test_utils;

use cli::Cli;

/// Main entry point for the PowerCast tooling.
#[tokio::main]
async fn main() -> Result<()> {
    // `.env` may set RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    cli.run().await
}

/// `RUST_LOG`, read after `.env` is loaded, or the crate defaults.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "powercast=debug,compute=debug,tower_http=debug".into())
}
