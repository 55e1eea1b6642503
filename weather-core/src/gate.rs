use std::sync::Arc;

use crate::{
    assemble::assemble,
    cache::ResponseCache,
    error::WeatherError,
    model::{CacheTimeout, Locale, LocalizedWeatherResult},
    provider::WeatherFetcher,
};

/// Cache key for a city in a locale. Case-sensitive, no normalization.
pub fn cache_key(city: &str, locale: Locale) -> String {
    format!("{city}_{locale}")
}

/// Serves localized results from the cache, fetching and storing on a miss.
///
/// Concurrent misses for the same key each fetch; the last write wins.
#[derive(Debug, Clone)]
pub struct CacheGate {
    cache: Arc<dyn ResponseCache>,
}

impl CacheGate {
    pub fn new(cache: Arc<dyn ResponseCache>) -> Self {
        Self { cache }
    }

    /// Icon-free result for `city`, from the cache when present.
    ///
    /// The timeout is validated before the cache is consulted. A hit is returned as stored,
    /// without refreshing its TTL.
    pub async fn get_or_fetch(
        &self,
        city: &str,
        locale: Locale,
        cache_timeout_minutes: u32,
        fetcher: &dyn WeatherFetcher,
    ) -> Result<LocalizedWeatherResult, WeatherError> {
        let timeout = CacheTimeout::from_minutes(cache_timeout_minutes)?;
        let key = cache_key(city, locale);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::info!("Cache hit for: {key}");
            return Ok(cached);
        }

        tracing::debug!("Cache miss for: {key}");
        let payload = fetcher.fetch(city, locale).await?;
        let result = assemble(&payload, locale, false)?;

        self.cache.set(key, result.clone(), timeout.ttl()).await;
        tracing::debug!(
            "Cached weather for {city} ({locale}) for {} minutes",
            timeout.minutes()
        );

        Ok(result)
    }
}
