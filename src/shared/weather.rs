//! OpenWeatherMap current-weather client.
//!
//! Every failure path degrades to fixed demo weather. The result type keeps
//! the degradation visible: callers that only need numbers use
//! [`WeatherLookup::observation`], callers that care can match on
//! [`WeatherLookup::Fallback`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::shared::models::constants::{
    DEMO_API_KEY, DEMO_DESCRIPTION, DEMO_HUMIDITY, DEMO_TEMPERATURE, WEATHER_TIMEOUT_SECS,
};

/// Current conditions at a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    pub description: String,
}

impl WeatherObservation {
    pub fn demo() -> Self {
        Self {
            temperature: DEMO_TEMPERATURE,
            humidity: DEMO_HUMIDITY,
            description: DEMO_DESCRIPTION.to_string(),
        }
    }
}

/// Why live data was replaced with demo values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FallbackReason {
    #[error("no weather API key configured")]
    NoApiKey,
    #[error("weather provider returned status {0}")]
    Status(u16),
    #[error("weather request failed: {0}")]
    Network(String),
    #[error("could not decode weather response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Live(WeatherObservation),
    Fallback(FallbackReason),
}

impl WeatherLookup {
    pub fn observation(&self) -> WeatherObservation {
        match self {
            WeatherLookup::Live(obs) => obs.clone(),
            WeatherLookup::Fallback(_) => WeatherObservation::demo(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, WeatherLookup::Live(_))
    }

    pub fn source(&self) -> &'static str {
        if self.is_live() {
            "live"
        } else {
            "demo"
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: OpenWeatherMain,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

impl From<OpenWeatherResponse> for WeatherObservation {
    fn from(raw: OpenWeatherResponse) -> Self {
        Self {
            temperature: raw.main.temp,
            humidity: raw.main.humidity.round().clamp(0.0, 100.0) as u8,
            description: raw
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(WEATHER_TIMEOUT_SECS))
            .build()?;

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != DEMO_API_KEY);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn get_weather(&self, lat: f64, lon: f64) -> WeatherLookup {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No weather API key configured, using demo data");
            return WeatherLookup::Fallback(FallbackReason::NoApiKey);
        };

        match self.fetch(lat, lon, api_key).await {
            Ok(obs) => WeatherLookup::Live(obs),
            Err(reason) => {
                warn!(lat, lon, "Falling back to demo weather: {}", reason);
                WeatherLookup::Fallback(reason)
            }
        }
    }

    async fn fetch(&self, lat: f64, lon: f64, api_key: &str) -> Result<WeatherObservation, FallbackReason> {
        let url = format!("{}/weather", self.base_url);
        let lat = lat.to_string();
        let lon = lon.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FallbackReason::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FallbackReason::Status(status.as_u16()));
        }

        let raw: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|e| FallbackReason::Decode(e.to_string()))?;

        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_no_key_returns_demo_data() {
        let client = WeatherClient::new("http://unused.invalid", None).unwrap();
        let lookup = client.get_weather(28.6, 77.2).await;

        assert_eq!(lookup, WeatherLookup::Fallback(FallbackReason::NoApiKey));
        let obs = lookup.observation();
        assert_eq!(obs.temperature, 32.0);
        assert_eq!(obs.humidity, 65);
        assert_eq!(obs.description, "clear sky");
    }

    #[tokio::test]
    async fn test_placeholder_key_counts_as_missing() {
        let client = WeatherClient::new("http://unused.invalid", Some("demo_key".into())).unwrap();
        assert!(!client.has_api_key());

        let client = WeatherClient::new("http://unused.invalid", Some("  ".into())).unwrap();
        assert!(!client.has_api_key());
    }

    #[tokio::test]
    async fn test_live_response_is_parsed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("appid", "secret"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": 36.4, "humidity": 40},
                "weather": [{"description": "light rain"}]
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), Some("secret".into())).unwrap();
        let lookup = client.get_weather(28.6139, 77.209).await;

        assert!(lookup.is_live());
        assert_eq!(lookup.source(), "live");
        let obs = lookup.observation();
        assert_eq!(obs.temperature, 36.4);
        assert_eq!(obs.humidity, 40);
        assert_eq!(obs.description, "light rain");
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_demo() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), Some("secret".into())).unwrap();
        let lookup = client.get_weather(1.0, 2.0).await;

        assert_eq!(lookup, WeatherLookup::Fallback(FallbackReason::Status(500)));
        assert_eq!(lookup.observation(), WeatherObservation::demo());
        assert_eq!(lookup.source(), "demo");
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back_to_demo() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), Some("secret".into())).unwrap();
        let lookup = client.get_weather(1.0, 2.0).await;

        assert!(matches!(lookup, WeatherLookup::Fallback(FallbackReason::Decode(_))));
        assert_eq!(lookup.observation(), WeatherObservation::demo());
    }

    #[tokio::test]
    async fn test_unreachable_provider_falls_back_to_demo() {
        let client = WeatherClient::new("http://127.0.0.1:1", Some("secret".into())).unwrap();
        let lookup = client.get_weather(1.0, 2.0).await;

        assert!(matches!(lookup, WeatherLookup::Fallback(FallbackReason::Network(_))));
        assert_eq!(lookup.observation(), WeatherObservation::demo());
    }
}
