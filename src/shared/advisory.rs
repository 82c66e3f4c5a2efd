use serde::{Deserialize, Serialize};

use crate::shared::models::constants::{
    DEFAULT_COLD_THRESHOLD, DEFAULT_HEAT_THRESHOLD, DEFAULT_IRRIGATION_THRESHOLD,
};
use crate::shared::models::Language;
use crate::shared::weather::WeatherObservation;

/// Thresholds that turn raw weather into farmer advice. All temperatures
/// are in degrees Celsius and every bound is strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryPolicy {
    #[serde(default = "default_heat_threshold")]
    pub heat_threshold: f64,
    #[serde(default = "default_cold_threshold")]
    pub cold_threshold: f64,
    #[serde(default = "default_irrigation_threshold")]
    pub irrigation_threshold: f64,
    #[serde(default = "default_rain_marker")]
    pub rain_marker: String,
}

impl Default for AdvisoryPolicy {
    fn default() -> Self {
        Self {
            heat_threshold: default_heat_threshold(),
            cold_threshold: default_cold_threshold(),
            irrigation_threshold: default_irrigation_threshold(),
            rain_marker: default_rain_marker(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    Heat,
    Cold,
    Normal,
}

impl AdvisoryPolicy {
    pub fn classify_temperature(&self, temperature: f64) -> AlertTier {
        if temperature > self.heat_threshold {
            AlertTier::Heat
        } else if temperature < self.cold_threshold {
            AlertTier::Cold
        } else {
            AlertTier::Normal
        }
    }

    pub fn needs_irrigation(&self, temperature: f64) -> bool {
        temperature > self.irrigation_threshold
    }

    pub fn expects_rain(&self, description: &str) -> bool {
        description
            .to_lowercase()
            .contains(&self.rain_marker.to_lowercase())
    }

    pub fn alert_text(&self, temperature: f64, language: Language) -> String {
        let tier = self.classify_temperature(temperature);
        match (tier, language) {
            (AlertTier::Heat, Language::Hindi) => {
                format!("🌡️ तेज़ गर्मी ({temperature}°C)! अधिक पानी दें।")
            }
            (AlertTier::Heat, Language::English) => {
                format!("🌡️ Extreme heat ({temperature}°C)! Give your crops extra water.")
            }
            (AlertTier::Cold, Language::Hindi) => format!("🥶 ठंड ({temperature}°C)! पाले से बचाएं।"),
            (AlertTier::Cold, Language::English) => {
                format!("🥶 Cold spell ({temperature}°C)! Protect crops from frost.")
            }
            (AlertTier::Normal, Language::Hindi) => {
                format!("🌤️ मौसम सामान्य ({temperature}°C)। नियमित देखभाल करें।")
            }
            (AlertTier::Normal, Language::English) => {
                format!("🌤️ Weather is normal ({temperature}°C). Continue routine care.")
            }
        }
    }

    pub fn rain_advisory(&self, weather: &WeatherObservation, language: Language) -> String {
        let rain = self.expects_rain(&weather.description);
        match (rain, language) {
            (true, Language::Hindi) => "🌧️ बारिश की संभावना है। सिंचाई और छिड़काव टाल दें।".to_string(),
            (true, Language::English) => {
                "🌧️ Rain is likely. Postpone irrigation and spraying.".to_string()
            }
            (false, Language::Hindi) => "☀️ बारिश की संभावना नहीं है। योजना के अनुसार सिंचाई करें।".to_string(),
            (false, Language::English) => "☀️ No rain expected. Irrigate as planned.".to_string(),
        }
    }
}

fn default_heat_threshold() -> f64 {
    DEFAULT_HEAT_THRESHOLD
}

fn default_cold_threshold() -> f64 {
    DEFAULT_COLD_THRESHOLD
}

fn default_irrigation_threshold() -> f64 {
    DEFAULT_IRRIGATION_THRESHOLD
}

fn default_rain_marker() -> String {
    "rain".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_tiers() {
        let policy = AdvisoryPolicy::default();
        assert_eq!(policy.classify_temperature(36.0), AlertTier::Heat);
        assert_eq!(policy.classify_temperature(5.0), AlertTier::Cold);
        assert_eq!(policy.classify_temperature(20.0), AlertTier::Normal);
    }

    #[test]
    fn test_tier_bounds_are_strict() {
        let policy = AdvisoryPolicy::default();
        assert_eq!(policy.classify_temperature(35.0), AlertTier::Normal);
        assert_eq!(policy.classify_temperature(10.0), AlertTier::Normal);
        assert!(!policy.needs_irrigation(30.0));
        assert!(policy.needs_irrigation(30.5));
    }

    #[test]
    fn test_alert_text_mentions_temperature() {
        let policy = AdvisoryPolicy::default();
        assert_eq!(
            policy.alert_text(36.0, Language::Hindi),
            "🌡️ तेज़ गर्मी (36°C)! अधिक पानी दें।"
        );
        assert!(policy.alert_text(5.0, Language::English).contains("frost"));
        assert!(policy.alert_text(20.0, Language::English).contains("(20°C)"));
    }

    #[test]
    fn test_custom_thresholds() {
        let policy: AdvisoryPolicy =
            serde_json::from_str(r#"{"heat_threshold": 40.0}"#).unwrap();
        assert_eq!(policy.classify_temperature(38.0), AlertTier::Normal);
        assert_eq!(policy.cold_threshold, 10.0);
    }

    #[test]
    fn test_rain_advisory_inspects_description() {
        let policy = AdvisoryPolicy::default();
        let mut weather = WeatherObservation::demo();
        assert!(policy
            .rain_advisory(&weather, Language::English)
            .starts_with("☀️"));

        weather.description = "Moderate Rain".to_string();
        assert!(policy
            .rain_advisory(&weather, Language::English)
            .contains("Postpone"));
    }
}
