use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::shared::advisory::AdvisoryPolicy;
use crate::shared::models::{KnowledgeBase, Language};
use crate::shared::weather::WeatherClient;

#[derive(Error, Debug, PartialEq)]
pub enum ComposeError {
    #[error("Invalid location '{0}', expected \"lat,lon\"")]
    InvalidLocation(String),
    #[error("No market price configured for '{0}'")]
    MissingPrice(String),
}

/// Reply category picked from message keywords. Distress is handled
/// separately since it overrides every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Weather,
    Price,
    Pest,
    General,
}

#[derive(Debug, Clone)]
pub struct ResponseComposer {
    knowledge: Arc<KnowledgeBase>,
    weather: WeatherClient,
    policy: AdvisoryPolicy,
}

impl ResponseComposer {
    pub fn new(knowledge: Arc<KnowledgeBase>, weather: WeatherClient, policy: AdvisoryPolicy) -> Self {
        Self {
            knowledge,
            weather,
            policy,
        }
    }

    /// Checked in order: weather, then price, then pest.
    pub fn detect_intent(&self, message: &str) -> Intent {
        let lower = message.to_lowercase();
        let intents = &self.knowledge.intents;

        if contains_any(&lower, &intents.weather) {
            Intent::Weather
        } else if contains_any(&lower, &intents.price) {
            Intent::Price
        } else if contains_any(&lower, &intents.pest) {
            Intent::Pest
        } else {
            Intent::General
        }
    }

    pub async fn compose_reply(
        &self,
        message: &str,
        language: Language,
        location: &str,
        distressed: bool,
    ) -> Result<String, ComposeError> {
        if distressed {
            return Ok(crisis_reply(language).to_string());
        }

        let intent = self.detect_intent(message);
        debug!(?intent, "Composing chat reply");

        match intent {
            Intent::Weather => {
                let (lat, lon) = parse_location(location)?;
                let weather = self.weather.get_weather(lat, lon).await.observation();
                let irrigate = self.policy.needs_irrigation(weather.temperature);
                let temp = weather.temperature;
                let humidity = weather.humidity;

                Ok(match language {
                    Language::Hindi => {
                        let advice = if irrigate { "सिंचाई करें" } else { "सामान्य देखभाल करें" };
                        format!(
                            "🌤️ मौसम:\n• तापमान: {temp}°C\n• नमी: {humidity}%\n\n💡 सलाह: तापमान {temp}°C है। {advice}।"
                        )
                    }
                    Language::English => {
                        let advice = if irrigate { "Irrigate your fields" } else { "Continue routine care" };
                        format!(
                            "🌤️ Weather:\n• Temperature: {temp}°C\n• Humidity: {humidity}%\n\n💡 Advice: It is {temp}°C. {advice}."
                        )
                    }
                })
            }
            Intent::Price => {
                let record = self
                    .knowledge
                    .featured_price()
                    .ok_or_else(|| ComposeError::MissingPrice(self.knowledge.featured_crop.clone()))?;

                let change = if record.is_rising() {
                    format!("↑{}%", record.percent_change)
                } else {
                    format!("↓{}%", record.percent_change.abs())
                };
                let name = record.name(language);
                let price = record.price;

                Ok(match language {
                    Language::Hindi => {
                        let trend = if record.is_rising() {
                            "📈 अच्छा भाव है!"
                        } else {
                            "📉 भाव में गिरावट है।"
                        };
                        format!("💰 आज का भाव:\n{name}: ₹{price}/क्विंटल\nकल से: {change}\n\n{trend}")
                    }
                    Language::English => {
                        let trend = if record.is_rising() {
                            "📈 Good price today!"
                        } else {
                            "📉 Prices are down."
                        };
                        format!("💰 Today's price:\n{name}: ₹{price}/quintal\nSince yesterday: {change}\n\n{trend}")
                    }
                })
            }
            Intent::Pest => Ok(pest_instructions(language).to_string()),
            Intent::General => Ok(help_menu(language).to_string()),
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(n.to_lowercase().as_str()))
}

/// Parses `"lat,lon"`. Exactly two finite, in-range numbers are accepted.
pub fn parse_location(location: &str) -> Result<(f64, f64), ComposeError> {
    let invalid = || ComposeError::InvalidLocation(location.to_string());

    let mut parts = location.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid());
    }

    Ok((lat, lon))
}

fn crisis_reply(language: Language) -> &'static str {
    match language {
        Language::Hindi => {
            "मैं समझ सकता हूं कि यह मुश्किल समय है। \n\n📞 तुरंत मदद:\n• किसान हेल्पलाइन: 1800-180-1551  \n• मानसिक स्वास्थ्य: 1800-599-0019\n\n💡 याद रखें: हर समस्या का हल है।"
        }
        Language::English => {
            "I understand this is a difficult time.\n\n📞 Immediate help:\n• Kisan helpline: 1800-180-1551\n• Mental health: 1800-599-0019\n\n💡 Remember: every problem has a solution."
        }
    }
}

fn pest_instructions(language: Language) -> &'static str {
    match language {
        Language::Hindi => {
            "🔍 कीट की पहचान के लिए:\n\n1️⃣ पौधे की तस्वीर खींचें\n2️⃣ कैमरा बटन दबाएं\n3️⃣ अपलोड करें\n\nमैं तुरंत उपचार बताऊंगा!"
        }
        Language::English => {
            "🔍 To identify a pest:\n\n1️⃣ Take a photo of the plant\n2️⃣ Press the camera button\n3️⃣ Upload it\n\nI will suggest a treatment right away!"
        }
    }
}

fn help_menu(language: Language) -> &'static str {
    match language {
        Language::Hindi => {
            "नमस्ते! मैं FarmAssist हूं। मैं मदद कर सकता हूं:\n\n🌤️ मौसम की जानकारी\n💰 बाज़ार के दाम  \n🔍 कीट-रोग की पहचान\n🌱 फसल की सलाह\n📞 आपातकालीन मदद\n\nआपका सवाल क्या है?"
        }
        Language::English => {
            "Hello! I am FarmAssist. I can help with:\n\n🌤️ Weather updates\n💰 Market prices\n🔍 Pest and disease identification\n🌱 Crop advice\n📞 Emergency support\n\nWhat is your question?"
        }
    }
}
