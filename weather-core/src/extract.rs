use isocountry::CountryCode;

use crate::{
    compass::compass_direction,
    error::WeatherError,
    model::{RawCondition, RawMain, RawWeatherPayload, RawWind},
    translate::Field,
};

pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// Pull one field out of a provider payload and render it as a string.
///
/// `Field::CurrentWeather` names the response envelope and has no value, so it yields
/// `Ok(None)`. Missing data fails with `MalformedPayload`, except the country which falls
/// back to [`UNKNOWN_COUNTRY`].
pub fn extract(payload: &RawWeatherPayload, field: Field) -> Result<Option<String>, WeatherError> {
    let value = match field {
        Field::CurrentWeather => return Ok(None),
        Field::City => payload
            .name
            .clone()
            .ok_or_else(|| WeatherError::missing("name"))?,
        Field::Country => {
            let code = payload.sys.as_ref().and_then(|sys| sys.country.as_deref());
            country_name(code.unwrap_or_default()).to_string()
        }
        Field::Temperature => number(main_block(payload)?.temp.as_ref(), "main.temp")?,
        Field::TemperatureMin => number(main_block(payload)?.temp_min.as_ref(), "main.temp_min")?,
        Field::TemperatureMax => number(main_block(payload)?.temp_max.as_ref(), "main.temp_max")?,
        Field::Humidity => number(main_block(payload)?.humidity.as_ref(), "main.humidity")?,
        Field::Pressure => number(main_block(payload)?.pressure.as_ref(), "main.pressure")?,
        Field::WindSpeed => number(wind_block(payload)?.speed.as_ref(), "wind.speed")?,
        Field::WindDirection => {
            let degrees = wind_block(payload)?
                .deg
                .as_ref()
                .and_then(serde_json::Number::as_f64)
                .ok_or_else(|| WeatherError::missing("wind.deg"))?;
            compass_direction(degrees).to_string()
        }
        Field::Description => first_condition(payload)?
            .description
            .clone()
            .ok_or_else(|| WeatherError::missing("weather[0].description"))?,
        Field::Icon => first_condition(payload)?
            .icon
            .clone()
            .ok_or_else(|| WeatherError::missing("weather[0].icon"))?,
    };

    Ok(Some(value))
}

/// Short names for codes whose ISO 3166 entry carries a longer formal name,
/// e.g. `GB` is "United Kingdom" rather than "United Kingdom of Great Britain and
/// Northern Ireland".
const SHORT_NAMES: &[(&str, &str)] = &[
    ("BN", "Brunei Darussalam"),
    ("BO", "Bolivia, Plurinational State of"),
    ("BQ", "Bonaire, Sint Eustatius and Saba"),
    ("BS", "Bahamas"),
    ("CC", "Cocos (Keeling) Islands"),
    ("CD", "Congo, The Democratic Republic of the"),
    ("CG", "Congo"),
    ("CI", "Côte d'Ivoire"),
    ("CV", "Cabo Verde"),
    ("CZ", "Czechia"),
    ("FK", "Falkland Islands (Malvinas)"),
    ("FM", "Micronesia, Federated States of"),
    ("GB", "United Kingdom"),
    ("GM", "Gambia"),
    ("IR", "Iran, Islamic Republic of"),
    ("KP", "Korea, Democratic People's Republic of"),
    ("KR", "Korea, Republic of"),
    ("LA", "Lao People's Democratic Republic"),
    ("MD", "Moldova, Republic of"),
    ("MF", "Saint Martin (French part)"),
    ("MK", "North Macedonia"),
    ("NL", "Netherlands"),
    ("PS", "Palestine, State of"),
    ("RU", "Russian Federation"),
    ("SH", "Saint Helena, Ascension and Tristan da Cunha"),
    ("SX", "Sint Maarten (Dutch part)"),
    ("SY", "Syrian Arab Republic"),
    ("SZ", "Eswatini"),
    ("TR", "Türkiye"),
    ("TW", "Taiwan, Province of China"),
    ("TZ", "Tanzania, United Republic of"),
    ("US", "United States"),
    ("VA", "Holy See (Vatican City State)"),
    ("VE", "Venezuela, Bolivarian Republic of"),
    ("VG", "Virgin Islands, British"),
    ("VI", "Virgin Islands, U.S."),
    ("VN", "Viet Nam"),
];

/// Resolve an ISO 3166-1 alpha-2 code to the country's short name.
pub fn country_name(code: &str) -> &'static str {
    let code = code.trim().to_ascii_uppercase();
    if code.is_empty() {
        return UNKNOWN_COUNTRY;
    }
    match CountryCode::for_alpha2(&code) {
        Ok(country) => SHORT_NAMES
            .iter()
            .find(|(alpha2, _)| *alpha2 == code)
            .map_or(country.name(), |(_, name)| *name),
        Err(_) => {
            tracing::debug!("Unresolvable country code: {code}");
            UNKNOWN_COUNTRY
        }
    }
}

fn main_block(payload: &RawWeatherPayload) -> Result<&RawMain, WeatherError> {
    payload.main.as_ref().ok_or_else(|| WeatherError::missing("main"))
}

fn wind_block(payload: &RawWeatherPayload) -> Result<&RawWind, WeatherError> {
    payload.wind.as_ref().ok_or_else(|| WeatherError::missing("wind"))
}

fn first_condition(payload: &RawWeatherPayload) -> Result<&RawCondition, WeatherError> {
    payload
        .weather
        .first()
        .ok_or_else(|| WeatherError::missing("weather[0]"))
}

fn number(value: Option<&serde_json::Number>, path: &str) -> Result<String, WeatherError> {
    value
        .map(ToString::to_string)
        .ok_or_else(|| WeatherError::missing(path))
}
