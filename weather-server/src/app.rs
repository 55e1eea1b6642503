//! HTTP surface: `GET /<city>/[<lang>/[<cache_timeout>/]]`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Serialize, ser::SerializeMap};
use weather_tracker_core::{
    CacheTimeout, Field, Locale, LocalizedWeatherResult, WeatherError, WeatherQuery,
    WeatherService,
};

const DEFAULT_LANG: &str = "en";
const DEFAULT_CACHE_TIMEOUT: u32 = 10;

pub struct AppState {
    pub service: WeatherService,
}

pub fn router(service: WeatherService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/{city}", get(by_city))
        .route("/{city}/", get(by_city))
        .route("/{city}/{lang}", get(by_city_and_lang))
        .route("/{city}/{lang}/", get(by_city_and_lang))
        .route("/{city}/{lang}/{cache_timeout}", get(by_all))
        .route("/{city}/{lang}/{cache_timeout}/", get(by_all))
        .fallback(not_found)
        .with_state(state)
}

async fn by_city(State(state): State<Arc<AppState>>, Path(city): Path<String>) -> Response {
    current_weather(&state, &city, DEFAULT_LANG, &DEFAULT_CACHE_TIMEOUT.to_string()).await
}

async fn by_city_and_lang(
    State(state): State<Arc<AppState>>,
    Path((city, lang)): Path<(String, String)>,
) -> Response {
    current_weather(&state, &city, &lang, &DEFAULT_CACHE_TIMEOUT.to_string()).await
}

async fn by_all(
    State(state): State<Arc<AppState>>,
    Path((city, lang, cache_timeout)): Path<(String, String, String)>,
) -> Response {
    current_weather(&state, &city, &lang, &cache_timeout).await
}

async fn current_weather(state: &AppState, city: &str, lang: &str, cache_timeout: &str) -> Response {
    let query = match parse_query(city, lang, cache_timeout) {
        Ok(query) => query,
        Err(err) => {
            tracing::warn!("Rejected request for {city}: {err}");
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match state.service.current_weather(&query).await {
        Ok(result) => {
            tracing::debug!("Serving weather for city: {city}");
            let body = CurrentWeatherBody {
                locale: query.locale(),
                city,
                result: &result,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let message = format!("Error fetching weather data for the city {city}: {err}");
            tracing::error!("{message}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

fn parse_query(city: &str, lang: &str, cache_timeout: &str) -> Result<WeatherQuery, WeatherError> {
    let minutes = cache_timeout.parse::<u32>().map_err(|_| {
        WeatherError::invalid_parameter("cache_timeout", cache_timeout, CacheTimeout::ACCEPTED)
    })?;
    WeatherQuery::new(city, lang, minutes)
}

async fn not_found(uri: Uri) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("Not found: {}", uri.path()))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

/// `{ "<city key>": city, "<current_weather key>": result }` in the result's locale.
struct CurrentWeatherBody<'a> {
    locale: Locale,
    city: &'a str,
    result: &'a LocalizedWeatherResult,
}

impl Serialize for CurrentWeatherBody<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(Field::City.key(self.locale), self.city)?;
        map.serialize_entry(Field::CurrentWeather.key(self.locale), self.result)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;
    use weather_tracker_core::{MokaResponseCache, RawWeatherPayload, WeatherFetcher};

    use super::*;

    #[derive(Debug)]
    struct StubFetcher {
        response: Result<RawWeatherPayload, WeatherError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherFetcher for StubFetcher {
        async fn fetch(&self, _city: &str, _locale: Locale) -> Result<RawWeatherPayload, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn paris_payload() -> RawWeatherPayload {
        serde_json::from_value(serde_json::json!({
            "name": "Paris",
            "sys": { "country": "FR" },
            "main": { "temp": 18.5, "temp_min": 16.1, "temp_max": 20.3, "humidity": 55, "pressure": 1017 },
            "wind": { "speed": 3.1, "deg": 200 },
            "weather": [{ "description": "clear sky", "icon": "01d" }]
        }))
        .unwrap()
    }

    fn app_with(response: Result<RawWeatherPayload, WeatherError>) -> (Router, Arc<StubFetcher>) {
        let fetcher = Arc::new(StubFetcher {
            response,
            calls: AtomicUsize::new(0),
        });
        let service = WeatherService::new(Arc::new(MokaResponseCache::new(16)), fetcher.clone());
        (router(service), fetcher)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let res = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn full_route_returns_localized_envelope() {
        let (app, _) = app_with(Ok(paris_payload()));

        let (status, body) = get_json(&app, "/Paris/fr/60/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ville"], "Paris");
        let current = &body["temps_courant"];
        assert_eq!(current["ville"], "Paris");
        assert_eq!(current["pays"], "France");
        assert_eq!(current["température"], "18.5");
        assert_eq!(current["direction_vent"], "SW");
        assert_eq!(current["description"], "clear sky");
        assert!(current.get("icône").is_none());
        assert_eq!(current.as_object().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn short_routes_use_defaults() {
        let (app, _) = app_with(Ok(paris_payload()));

        let (status, body) = get_json(&app, "/Paris/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_weather"]["city"], "Paris");

        let (status, body) = get_json(&app, "/Paris/de").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aktuelles_Wetter"]["temperatur"], "18.5");
    }

    #[tokio::test]
    async fn cache_hit_returns_same_envelope_without_fetching() {
        let (app, fetcher) = app_with(Ok(paris_payload()));

        let (_, first) = get_json(&app, "/Paris/en/10/").await;
        let (status, second) = get_json(&app, "/Paris/en/10/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_cache_timeout_is_bad_request() {
        let (app, fetcher) = app_with(Ok(paris_payload()));

        for uri in ["/Paris/en/7/", "/Paris/en/soon/"] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].as_str().unwrap().contains("cache_timeout"));
        }
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_language_is_bad_request() {
        let (app, fetcher) = app_with(Ok(paris_payload()));

        let (status, body) = get_json(&app, "/Paris/es/").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("language"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_internal_error() {
        let (app, _) = app_with(Err(WeatherError::ProviderUnavailable("connection refused".into())));

        let (status, body) = get_json(&app, "/Paris/en/5/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Error fetching weather data for the city Paris: "));
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn malformed_payload_is_internal_error() {
        let mut payload = paris_payload();
        payload.main = None;
        let (app, _) = app_with(Ok(payload));

        let (status, _) = get_json(&app, "/Paris/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unmatched_route_is_not_found() {
        let (app, _) = app_with(Ok(paris_payload()));

        let (status, body) = get_json(&app, "/Paris/en/10/extra/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().starts_with("Not found"));
    }
}
