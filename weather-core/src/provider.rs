use crate::{
    Config,
    error::WeatherError,
    model::{Locale, RawWeatherPayload},
    provider::openweather::OpenWeatherFetcher,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod openweather;

/// Source of raw current-weather payloads.
///
/// One request per call: implementations do not retry.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, city: &str, locale: Locale) -> Result<RawWeatherPayload, WeatherError>;
}

/// Construct the OpenWeather fetcher from config.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherFetcher>> {
    let api_key = config.api_key()?;

    let fetcher = OpenWeatherFetcher::new(
        api_key.to_owned(),
        config.current_weather_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    Ok(Arc::new(fetcher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn fetcher_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = fetcher_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `weather-tracker configure`"));
    }

    #[test]
    fn fetcher_from_config_works_when_key_present() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let fetcher = fetcher_from_config(&cfg);
        assert!(fetcher.is_ok());
    }
}
