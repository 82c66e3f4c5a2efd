use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::info;

use crate::shared::models::constants::PEST_CONFIDENCE;
use crate::shared::models::{KnowledgeBase, PestRecord};

#[derive(Debug, Clone)]
pub struct PestDetection {
    pub pest: PestRecord,
    pub confidence: f64,
}

/// Identifies the pest or disease shown in a crop photo.
#[async_trait]
pub trait PestClassifier: Send + Sync {
    fn name(&self) -> &str;

    /// `image` is the base64 payload when the client sent one as a string.
    async fn classify(&self, image: Option<&str>) -> Result<PestDetection>;
}

/// Simulated classifier for demos. It never looks at the image and picks a
/// pest uniformly at random from the knowledge base.
pub struct RandomPestClassifier {
    knowledge: Arc<KnowledgeBase>,
}

impl RandomPestClassifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl PestClassifier for RandomPestClassifier {
    fn name(&self) -> &str {
        "random-simulated"
    }

    async fn classify(&self, image: Option<&str>) -> Result<PestDetection> {
        match image {
            Some(image) => info!(
                image_bytes = image.len(),
                "Simulating pest detection, image content is ignored"
            ),
            None => info!("Simulating pest detection without an image"),
        }

        let pest = self
            .knowledge
            .pests
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| anyhow!("Pest table is empty"))?;

        Ok(PestDetection {
            pest: pest.clone(),
            confidence: PEST_CONFIDENCE,
        })
    }
}
