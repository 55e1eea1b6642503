use crate::{
    error::WeatherError,
    extract::extract,
    model::{Locale, LocalizedWeatherResult, RawWeatherPayload},
    translate::Field,
};

/// Build the localized result from a provider payload.
///
/// All-or-nothing: the first field that cannot be extracted aborts the whole result.
pub fn assemble(
    payload: &RawWeatherPayload,
    locale: Locale,
    include_icon: bool,
) -> Result<LocalizedWeatherResult, WeatherError> {
    let fields = Field::result_fields(include_icon);
    let mut entries = Vec::with_capacity(fields.len());

    for field in fields {
        if let Some(value) = extract(payload, *field)? {
            entries.push((*field, value));
        }
    }

    Ok(LocalizedWeatherResult::new(locale, entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> RawWeatherPayload {
        serde_json::from_value(serde_json::json!({
            "name": "Paris",
            "sys": { "country": "FR" },
            "main": { "temp": 18.5, "temp_min": 16.1, "temp_max": 20.3, "humidity": 55, "pressure": 1017 },
            "wind": { "speed": 3.1, "deg": 200 },
            "weather": [{ "description": "clear sky", "icon": "01d" }]
        }))
        .unwrap()
    }

    #[test]
    fn french_result_uses_french_keys() {
        let result = assemble(&paris(), Locale::Fr, false).unwrap();

        assert_eq!(result.get_by_key("ville"), Some("Paris"));
        assert_eq!(result.get_by_key("pays"), Some("France"));
        assert_eq!(result.get_by_key("température"), Some("18.5"));
        assert_eq!(result.get_by_key("humidité"), Some("55"));
        assert_eq!(result.get_by_key("direction_vent"), Some("SW"));
        assert_eq!(result.get_by_key("description"), Some("clear sky"));
        assert_eq!(result.get_by_key("temperature"), None);
    }

    #[test]
    fn exactly_ten_fields_without_icon() {
        for locale in Locale::all() {
            let result = assemble(&paris(), *locale, false).unwrap();
            assert_eq!(result.len(), 10);
            assert!(!result.contains(Field::Icon));
            assert_eq!(result.get_by_key(Field::Icon.key(*locale)), None);
        }
    }

    #[test]
    fn icon_included_on_request() {
        let result = assemble(&paris(), Locale::De, true).unwrap();
        assert_eq!(result.len(), 11);
        assert_eq!(result.get_by_key("symbol"), Some("01d"));
    }

    #[test]
    fn serialized_keys_come_from_one_locale() {
        let result = assemble(&paris(), Locale::De, false).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();

        for field in Field::result_fields(false) {
            assert!(keys.contains(&field.key(Locale::De).to_string()), "{field}");
        }
        assert!(!keys.contains(&"city".to_string()));
    }

    #[test]
    fn missing_main_fails_without_partial_result() {
        let mut payload = paris();
        payload.main = None;

        let err = assemble(&payload, Locale::En, false).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
    }

    #[test]
    fn missing_icon_only_matters_when_requested() {
        let mut payload = paris();
        payload.weather[0].icon = None;

        assert!(assemble(&payload, Locale::En, false).is_ok());
        assert!(assemble(&payload, Locale::En, true).is_err());
    }
}
