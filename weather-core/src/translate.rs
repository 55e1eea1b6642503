//! Localized key names for the response fields.

use std::{fmt, str::FromStr};

use crate::{error::WeatherError, model::Locale};

/// Identifier of a response field, independent of the output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CurrentWeather,
    City,
    Country,
    Temperature,
    TemperatureMin,
    TemperatureMax,
    Humidity,
    Pressure,
    WindSpeed,
    WindDirection,
    Description,
    Icon,
}

impl Field {
    pub const fn all() -> &'static [Field] {
        &[
            Field::CurrentWeather,
            Field::City,
            Field::Country,
            Field::Temperature,
            Field::TemperatureMin,
            Field::TemperatureMax,
            Field::Humidity,
            Field::Pressure,
            Field::WindSpeed,
            Field::WindDirection,
            Field::Description,
            Field::Icon,
        ]
    }

    /// Fields carried by a weather result, in output order. `CurrentWeather` only names the
    /// envelope and `Icon` is only shown on the display path.
    pub const fn result_fields(include_icon: bool) -> &'static [Field] {
        let all = Field::all();
        let (_, with_icon) = all.split_at(1);
        if include_icon {
            with_icon
        } else {
            let (without_icon, _) = with_icon.split_at(with_icon.len() - 1);
            without_icon
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CurrentWeather => "current_weather",
            Field::City => "city",
            Field::Country => "country",
            Field::Temperature => "temperature",
            Field::TemperatureMin => "temperature_min",
            Field::TemperatureMax => "temperature_max",
            Field::Humidity => "humidity",
            Field::Pressure => "pressure",
            Field::WindSpeed => "wind_speed",
            Field::WindDirection => "wind_direction",
            Field::Description => "description",
            Field::Icon => "icon",
        }
    }

    /// Key under which this field appears in a response for `locale`.
    pub fn key(&self, locale: Locale) -> &'static str {
        let [en, de, fr] = self.spellings();
        match locale {
            Locale::En => en,
            Locale::De => de,
            Locale::Fr => fr,
        }
    }

    const fn spellings(&self) -> [&'static str; 3] {
        match self {
            Field::CurrentWeather => ["current_weather", "aktuelles_Wetter", "temps_courant"],
            Field::City => ["city", "stadt", "ville"],
            Field::Country => ["country", "land", "pays"],
            Field::Temperature => ["temperature", "temperatur", "température"],
            Field::TemperatureMin => ["temperature_min", "temperatur_min", "température_min"],
            Field::TemperatureMax => ["temperature_max", "temperatur_max", "température_max"],
            Field::Humidity => ["humidity", "luftfeuchtigkeit", "humidité"],
            Field::Pressure => ["pressure", "druck", "pression"],
            Field::WindSpeed => ["wind_speed", "wind_geschwindigkeit", "vitesse_vent"],
            Field::WindDirection => ["wind_direction", "wind_richtung", "direction_vent"],
            Field::Description => ["description", "beschreibung", "description"],
            Field::Icon => ["icon", "symbol", "icône"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| WeatherError::UnknownField(s.to_string()))
    }
}

/// String-level lookup: `translate("temperature", "de") == Ok("temperatur")`.
pub fn translate(field_id: &str, locale: &str) -> Result<&'static str, WeatherError> {
    let field: Field = field_id.parse()?;
    let locale: Locale = locale.parse()?;
    Ok(field.key(locale))
}
