//! Binary crate for the `weather-tracker` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the current-weather HTTP endpoint
//! - Interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cmd.log_level)),
        )
        .init();

    cmd.run().await
}
