use thiserror::Error;

/// Failures of the fetch → translate → cache pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Caller input rejected before any I/O (bad city, locale or cache timeout).
    #[error("Invalid {name} value '{value}'. Accepted values are: {accepted}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        accepted: &'static str,
    },

    /// Network failure, transport timeout or non-2xx status from the provider.
    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered, but the body lacks a field the pipeline needs.
    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown field identifier '{0}'")]
    UnknownField(String),

    #[error("Unsupported locale '{0}'. Supported locales: en, de, fr")]
    UnsupportedLocale(String),
}

impl WeatherError {
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        accepted: &'static str,
    ) -> Self {
        WeatherError::InvalidParameter {
            name,
            value: value.to_string(),
            accepted,
        }
    }

    pub fn missing(path: &str) -> Self {
        WeatherError::MalformedPayload(format!("missing field `{path}`"))
    }

    /// True for errors caused by the caller's input rather than by the provider or the code.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, WeatherError::InvalidParameter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_lists_accepted_values() {
        let err = WeatherError::invalid_parameter("cache_timeout", 7, "[5, 10, 60]");
        assert_eq!(
            err.to_string(),
            "Invalid cache_timeout value '7'. Accepted values are: [5, 10, 60]"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn provider_errors_are_not_caller_errors() {
        assert!(!WeatherError::ProviderUnavailable("timeout".into()).is_invalid_parameter());
        assert!(!WeatherError::missing("main").is_invalid_parameter());
    }
}
