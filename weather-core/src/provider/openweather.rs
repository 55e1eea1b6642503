use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use url::form_urlencoded;

use crate::{
    error::WeatherError,
    model::{Locale, RawWeatherPayload},
};

use super::WeatherFetcher;

pub const DEFAULT_CURRENT_WEATHER_URL: &str =
    "https://api.openweathermap.org/data/2.5/weather?q={city}&appid={api_key}&units=metric&lang={lang}";

/// Current-weather fetcher for the OpenWeather API.
///
/// The URL template may contain the placeholders `{city}`, `{api_key}` and `{lang}`.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    api_key: String,
    url_template: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(
        api_key: String,
        url_template: String,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            WeatherError::ProviderUnavailable(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key,
            url_template,
            http,
        })
    }

    /// Substitute the placeholders with form-encoded values.
    pub fn request_url(&self, city: &str, locale: Locale) -> Result<Url, WeatherError> {
        let url = self
            .url_template
            .replace("{city}", &encode(city))
            .replace("{api_key}", &encode(&self.api_key))
            .replace("{lang}", locale.as_str());

        Url::parse(&url).map_err(|e| {
            WeatherError::ProviderUnavailable(format!("Invalid weather URL template: {e}"))
        })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, city: &str, locale: Locale) -> Result<RawWeatherPayload, WeatherError> {
        let url = self.request_url(city, locale)?;

        let res = self.http.get(url).send().await.map_err(|e| {
            WeatherError::ProviderUnavailable(format!(
                "Failed to send request to OpenWeather (current weather): {}",
                e.without_url()
            ))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::ProviderUnavailable(format!(
                "Failed to read OpenWeather current response body: {}",
                e.without_url()
            ))
        })?;

        if !status.is_success() {
            return Err(WeatherError::ProviderUnavailable(format!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedPayload(format!("Failed to parse OpenWeather current JSON: {e}"))
        })
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
