use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize, ser::SerializeMap};

use crate::{error::WeatherError, translate::Field};

/// Output language of a weather result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
}

impl Locale {
    pub const fn all() -> &'static [Locale] {
        &[Locale::En, Locale::De, Locale::Fr]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Fr => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            "fr" => Ok(Locale::Fr),
            _ => Err(WeatherError::UnsupportedLocale(s.to_string())),
        }
    }
}

/// How long a cached result stays valid. Only three windows are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheTimeout {
    Minutes5,
    #[default]
    Minutes10,
    Minutes60,
}

impl CacheTimeout {
    pub const ACCEPTED: &'static str = "[5, 10, 60]";

    pub fn from_minutes(minutes: u32) -> Result<Self, WeatherError> {
        match minutes {
            5 => Ok(CacheTimeout::Minutes5),
            10 => Ok(CacheTimeout::Minutes10),
            60 => Ok(CacheTimeout::Minutes60),
            other => Err(WeatherError::invalid_parameter(
                "cache_timeout",
                other,
                Self::ACCEPTED,
            )),
        }
    }

    pub fn minutes(&self) -> u32 {
        match self {
            CacheTimeout::Minutes5 => 5,
            CacheTimeout::Minutes10 => 10,
            CacheTimeout::Minutes60 => 60,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes()) * 60)
    }
}

/// A validated request for the current weather of one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
    locale: Locale,
    cache_timeout: CacheTimeout,
}

impl WeatherQuery {
    /// Validate raw caller input. Nothing here touches the network or the cache.
    pub fn new(city: &str, lang: &str, cache_timeout_minutes: u32) -> Result<Self, WeatherError> {
        if city.trim().is_empty() {
            return Err(WeatherError::invalid_parameter(
                "city",
                city,
                "a non-empty city name",
            ));
        }
        let locale = lang
            .parse::<Locale>()
            .map_err(|_| WeatherError::invalid_parameter("language", lang, "[en, de, fr]"))?;
        let cache_timeout = CacheTimeout::from_minutes(cache_timeout_minutes)?;

        Ok(Self {
            city: city.to_string(),
            locale,
            cache_timeout,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn cache_timeout(&self) -> CacheTimeout {
        self.cache_timeout
    }
}

/// Current-weather body as returned by the provider.
///
/// Every member is optional so that a structurally valid JSON object always parses; the
/// field extractor decides which absences are fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWeatherPayload {
    pub name: Option<String>,
    pub sys: Option<RawSys>,
    pub main: Option<RawMain>,
    pub wind: Option<RawWind>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSys {
    pub country: Option<String>,
}

/// Numbers are kept as JSON numbers so `1013` stays `"1013"` and `18.5` stays `"18.5"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMain {
    pub temp: Option<serde_json::Number>,
    pub temp_min: Option<serde_json::Number>,
    pub temp_max: Option<serde_json::Number>,
    pub humidity: Option<serde_json::Number>,
    pub pressure: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWind {
    pub speed: Option<serde_json::Number>,
    pub deg: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCondition {
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Weather values keyed by field, rendered with the key names of a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedWeatherResult {
    locale: Locale,
    entries: Vec<(Field, String)>,
}

impl LocalizedWeatherResult {
    pub(crate) fn new(locale: Locale, entries: Vec<(Field, String)>) -> Self {
        Self { locale, entries }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a value by its localized key, e.g. `"température"` in a French result.
    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// `(localized key, value)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        let locale = self.locale;
        self.entries
            .iter()
            .map(move |(field, value)| (field.key(locale), value.as_str()))
    }

    /// Drop the display-only icon, as stored in the cache and returned by the API.
    pub fn without_icon(mut self) -> Self {
        self.entries.retain(|(field, _)| *field != Field::Icon);
        self
    }
}

impl Serialize for LocalizedWeatherResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
