pub mod advisory;
pub mod composer;
pub mod config;
pub mod distress;
pub mod logging;
pub mod models;
pub mod pest_classifier;
pub mod weather;

use std::sync::Arc;

use anyhow::{Context, Result};

use config::{FarmConfig, ServerSettings};
use models::AppState;
use pest_classifier::RandomPestClassifier;

/// Builds the read-only state shared by every request.
pub fn init_state(settings: &ServerSettings) -> Result<AppState> {
    let config = FarmConfig::load(settings.config_path.as_deref())?;
    let weather_url = config::normalize_weather_url(&settings.weather_api_url)?;

    let weather = weather::WeatherClient::new(&weather_url, settings.openweather_api_key.clone())
        .context("Failed to create weather HTTP client")?;

    Ok(AppState::new(config, weather))
}

impl AppState {
    pub fn new(config: FarmConfig, weather: weather::WeatherClient) -> Self {
        let knowledge = Arc::new(config.knowledge);
        let distress = distress::DistressDetector::new(knowledge.distress_keywords.iter());
        let composer =
            composer::ResponseComposer::new(knowledge.clone(), weather.clone(), config.policy.clone());

        Self {
            pest_classifier: Arc::new(RandomPestClassifier::new(knowledge.clone())),
            knowledge,
            policy: config.policy,
            distress,
            weather,
            composer,
        }
    }
}
