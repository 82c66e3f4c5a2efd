use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::shared::advisory::AdvisoryPolicy;
use crate::shared::models::KnowledgeBase;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid weather API URL '{0}': {1}")]
    WeatherUrl(String, String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Runtime settings resolved from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub weather_api_url: String,
    pub openweather_api_key: Option<String>,
    pub config_path: Option<PathBuf>,
}

/// Optional JSON file that overrides the built-in tables and thresholds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FarmConfig {
    #[serde(default)]
    pub knowledge: KnowledgeBase,
    #[serde(default)]
    pub policy: AdvisoryPolicy,
}

impl FarmConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: FarmConfig =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Built-in tables when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    fn normalize(&mut self) {
        let kb = &mut self.knowledge;

        kb.featured_crop = kb.featured_crop.trim().to_lowercase();
        for pest in kb.pests.iter_mut() {
            pest.key = pest.key.trim().to_string();
        }
        for price in kb.prices.iter_mut() {
            price.crop = price.crop.trim().to_lowercase();
        }

        let clean = |list: &mut Vec<String>| {
            list.retain(|k| !k.trim().is_empty());
            for k in list.iter_mut() {
                *k = k.trim().to_lowercase();
            }
        };
        clean(&mut kb.distress_keywords);
        clean(&mut kb.intents.weather);
        clean(&mut kb.intents.price);
        clean(&mut kb.intents.pest);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let kb = &self.knowledge;

        if kb.pests.is_empty() {
            return Err(ConfigError::Invalid(
                "At least one pest record must be configured".to_string(),
            ));
        }
        if let Some(pest) = kb.pests.iter().find(|p| p.key.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "Pest record '{}' is missing a key",
                pest.name_en
            )));
        }
        if kb.featured_price().is_none() {
            return Err(ConfigError::Invalid(format!(
                "Featured crop '{}' has no market price",
                kb.featured_crop
            )));
        }
        if kb.distress_keywords.is_empty() {
            return Err(ConfigError::Invalid(
                "Distress keyword list must not be empty".to_string(),
            ));
        }

        let policy = &self.policy;
        if policy.cold_threshold >= policy.heat_threshold {
            return Err(ConfigError::Invalid(format!(
                "Cold threshold {} must be below heat threshold {}",
                policy.cold_threshold, policy.heat_threshold
            )));
        }
        if policy.rain_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Rain marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn normalize_weather_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::WeatherUrl(raw.to_string(), e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::WeatherUrl(
            raw.to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}
