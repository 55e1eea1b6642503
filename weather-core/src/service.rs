use std::sync::Arc;

use crate::{
    assemble::assemble,
    cache::ResponseCache,
    error::WeatherError,
    gate::CacheGate,
    model::{Locale, LocalizedWeatherResult, WeatherQuery},
    provider::WeatherFetcher,
};

/// Entry point used by the HTTP and CLI front-ends.
#[derive(Debug, Clone)]
pub struct WeatherService {
    gate: CacheGate,
    fetcher: Arc<dyn WeatherFetcher>,
}

impl WeatherService {
    pub fn new(cache: Arc<dyn ResponseCache>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self {
            gate: CacheGate::new(cache),
            fetcher,
        }
    }

    /// Cached, icon-free current weather for a validated query.
    pub async fn current_weather(
        &self,
        query: &WeatherQuery,
    ) -> Result<LocalizedWeatherResult, WeatherError> {
        self.gate
            .get_or_fetch(
                query.city(),
                query.locale(),
                query.cache_timeout().minutes(),
                self.fetcher.as_ref(),
            )
            .await
    }

    /// Uncached result including the icon, for rendering to a person.
    pub async fn display_weather(
        &self,
        city: &str,
        locale: Locale,
    ) -> Result<LocalizedWeatherResult, WeatherError> {
        let payload = self.fetcher.fetch(city, locale).await?;
        assemble(&payload, locale, true)
    }
}
