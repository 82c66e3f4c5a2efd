use std::sync::Arc;

use tracing::warn;

/// Flags messages that signal farmer distress so the chat can answer with
/// helpline information instead of routine advice.
#[derive(Debug, Clone)]
pub struct DistressDetector {
    keywords: Arc<[String]>,
}

impl DistressDetector {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>();

        Self {
            keywords: keywords.into(),
        }
    }

    /// Plain substring containment over the lowercased text. No stemming
    /// and no word boundaries, so "debtor" matches "debt".
    pub fn is_distressed(&self, text: &str) -> bool {
        let lower_text = text.to_lowercase();

        for keyword in self.keywords.iter() {
            if lower_text.contains(keyword.as_str()) {
                warn!("Distress keyword detected in chat message: {}", keyword);
                return true;
            }
        }

        false
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
