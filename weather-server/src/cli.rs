use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_tracker_core::{
    Config, Locale, MokaResponseCache, WeatherService, fetcher_from_config,
};

use crate::app;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tracker", version, about = "Localized current weather")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the current-weather HTTP endpoint.
    Serve {
        /// Address to listen on; overrides the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show current weather for a city, icon included.
    Show {
        /// City name as understood by the provider.
        city: String,

        /// Output language: en, de or fr.
        #[arg(long, default_value = "en")]
        lang: String,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => serve(bind).await,
            Command::Show { city, lang } => show(&city, &lang).await,
            Command::Configure => configure(),
        }
    }
}

fn build_service(config: &Config) -> anyhow::Result<WeatherService> {
    let fetcher = fetcher_from_config(config)?;
    let cache = Arc::new(MokaResponseCache::new(config.cache_max_entries));
    Ok(WeatherService::new(cache, fetcher))
}

async fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let config = Config::load_with_env()?;
    let service = build_service(&config)?;
    let addr = bind.unwrap_or_else(|| config.bind_address.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("weather-tracker listening on http://{addr}");

    axum::serve(listener, app::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("weather-tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
}

async fn show(city: &str, lang: &str) -> anyhow::Result<()> {
    let locale: Locale = lang.parse()?;
    let config = Config::load_with_env()?;
    let service = build_service(&config)?;

    let result = match service.display_weather(city, locale).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("An error occurred while fetching weather data for {city}: {e}");
            return Err(e).with_context(|| format!("Weather details not found for: {city}"));
        }
    };

    for (key, value) in result.iter() {
        println!("{key:>22}: {value}");
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    // Only the file is rewritten; environment overrides stay out of it.
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
