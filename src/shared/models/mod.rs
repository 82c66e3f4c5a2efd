use std::sync::Arc;

pub mod constants;
pub mod knowledge;

pub use knowledge::{KnowledgeBase, PestRecord};

use crate::shared::composer::ResponseComposer;
use crate::shared::advisory::AdvisoryPolicy;
use crate::shared::distress::DistressDetector;
use crate::shared::pest_classifier::PestClassifier;
use crate::shared::weather::WeatherClient;

/// Reply language. Anything other than English falls back to Hindi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Hindi,
    English,
}

impl Language {
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()) {
            Some(c) if c == "en" || c.starts_with("en-") || c == "english" => Language::English,
            _ => Language::Hindi,
        }
    }
}

// Application state
#[derive(Clone)]
pub struct AppState {
    pub knowledge: Arc<KnowledgeBase>,
    pub policy: AdvisoryPolicy,
    pub distress: DistressDetector,
    pub weather: WeatherClient,
    pub composer: ResponseComposer,
    pub pest_classifier: Arc<dyn PestClassifier>,
}
