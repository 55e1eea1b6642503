//! Core library for `weather-tracker`.
//!
//! This crate defines:
//! - The current-weather pipeline: fetch, extract, translate, assemble
//! - A TTL cache gate in front of the provider
//! - Configuration & credentials handling
//!
//! It is used by the `weather-tracker` binary, but can also be reused by other services.

pub mod assemble;
pub mod cache;
pub mod compass;
pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod model;
pub mod provider;
pub mod service;
pub mod translate;

pub use assemble::assemble;
pub use cache::{MokaResponseCache, ResponseCache};
pub use compass::{CompassPoint, compass_direction};
pub use config::Config;
pub use error::WeatherError;
pub use extract::extract;
pub use gate::{CacheGate, cache_key};
pub use model::{CacheTimeout, Locale, LocalizedWeatherResult, RawWeatherPayload, WeatherQuery};
pub use provider::{WeatherFetcher, fetcher_from_config, openweather::OpenWeatherFetcher};
pub use service::WeatherService;
pub use translate::{Field, translate};
