use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_FEATURED_CROP;
use super::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestRecord {
    pub key: String,
    pub name_hi: String,
    pub name_en: String,
    pub treatment_hi: String,
    pub treatment_en: String,
}

impl PestRecord {
    pub fn name(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.name_hi,
            Language::English => &self.name_en,
        }
    }

    pub fn treatment(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.treatment_hi,
            Language::English => &self.treatment_en,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub crop: String,
    pub name_hi: String,
    pub name_en: String,
    /// Rupees per quintal
    pub price: u32,
    /// Day-over-day change in percent
    pub percent_change: f64,
}

impl PriceRecord {
    pub fn name(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.name_hi,
            Language::English => &self.name_en,
        }
    }

    pub fn is_rising(&self) -> bool {
        self.percent_change > 0.0
    }
}

/// Keyword lists that route a chat message to a reply category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentKeywords {
    #[serde(default = "default_weather_keywords")]
    pub weather: Vec<String>,
    #[serde(default = "default_price_keywords")]
    pub price: Vec<String>,
    #[serde(default = "default_pest_keywords")]
    pub pest: Vec<String>,
}

impl Default for IntentKeywords {
    fn default() -> Self {
        Self {
            weather: default_weather_keywords(),
            price: default_price_keywords(),
            pest: default_pest_keywords(),
        }
    }
}

/// Static lookup tables shared read-only by every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default = "default_pests")]
    pub pests: Vec<PestRecord>,
    #[serde(default = "default_prices")]
    pub prices: Vec<PriceRecord>,
    #[serde(default = "default_distress_keywords")]
    pub distress_keywords: Vec<String>,
    #[serde(default)]
    pub intents: IntentKeywords,
    #[serde(default = "default_featured_crop")]
    pub featured_crop: String,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            pests: default_pests(),
            prices: default_prices(),
            distress_keywords: default_distress_keywords(),
            intents: IntentKeywords::default(),
            featured_crop: default_featured_crop(),
        }
    }
}

impl KnowledgeBase {
    pub fn find_price(&self, crop: &str) -> Option<&PriceRecord> {
        self.prices.iter().find(|p| p.crop.eq_ignore_ascii_case(crop))
    }

    pub fn featured_price(&self) -> Option<&PriceRecord> {
        self.find_price(&self.featured_crop)
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn default_weather_keywords() -> Vec<String> {
    words(&["weather", "मौसम", "rain", "बारिश"])
}

fn default_price_keywords() -> Vec<String> {
    words(&["price", "दाम", "भाव", "wheat", "गेहूं"])
}

fn default_pest_keywords() -> Vec<String> {
    words(&["pest", "कीट", "disease", "बीमारी"])
}

fn default_distress_keywords() -> Vec<String> {
    words(&[
        "निराश",
        "आत्महत्या",
        "कर्ज",
        "असफल",
        "suicide",
        "hopeless",
        "debt",
        "failure",
    ])
}

fn default_featured_crop() -> String {
    DEFAULT_FEATURED_CROP.to_string()
}

fn pest(key: &str, name_hi: &str, name_en: &str, treatment_hi: &str, treatment_en: &str) -> PestRecord {
    PestRecord {
        key: key.to_string(),
        name_hi: name_hi.to_string(),
        name_en: name_en.to_string(),
        treatment_hi: treatment_hi.to_string(),
        treatment_en: treatment_en.to_string(),
    }
}

fn default_pests() -> Vec<PestRecord> {
    vec![
        pest(
            "aphids",
            "माहू/एफिड्स",
            "Aphids",
            "नीम का तेल स्प्रे करें या साबुन के पानी का छिड़काव करें",
            "Spray neem oil or a mild soap-water solution",
        ),
        pest(
            "bollworm",
            "सुंडी/बॉलवर्म",
            "Bollworm",
            "BT स्प्रे या प्राकृतिक कीटनाशक का प्रयोग करें",
            "Use a BT spray or a natural pesticide",
        ),
        pest(
            "leaf_blight",
            "पत्ती झुलसा रोग",
            "Leaf blight",
            "कॉपर सल्फेट का छिड़काव करें और पानी कम दें",
            "Spray copper sulphate and reduce watering",
        ),
        pest(
            "powdery_mildew",
            "चूर्णिल आसिता",
            "Powdery mildew",
            "बेकिंग सोडा का घोल या सल्फर पाउडर का प्रयोग करें",
            "Apply a baking soda solution or sulphur powder",
        ),
    ]
}

fn default_prices() -> Vec<PriceRecord> {
    vec![
        PriceRecord {
            crop: "wheat".to_string(),
            name_hi: "गेहूं".to_string(),
            name_en: "Wheat".to_string(),
            price: 2150,
            percent_change: 3.2,
        },
        PriceRecord {
            crop: "rice".to_string(),
            name_hi: "चावल".to_string(),
            name_en: "Rice".to_string(),
            price: 1890,
            percent_change: -1.5,
        },
        PriceRecord {
            crop: "cotton".to_string(),
            name_hi: "कपास".to_string(),
            name_en: "Cotton".to_string(),
            price: 5650,
            percent_change: 2.8,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let kb = KnowledgeBase::default();
        assert_eq!(kb.pests.len(), 4);
        assert_eq!(kb.prices.len(), 3);
        assert_eq!(kb.distress_keywords.len(), 8);
    }

    #[test]
    fn test_featured_price_is_wheat() {
        let kb = KnowledgeBase::default();
        let wheat = kb.featured_price().unwrap();
        assert_eq!(wheat.price, 2150);
        assert!(wheat.is_rising());
        assert!(!kb.find_price("rice").unwrap().is_rising());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let kb: KnowledgeBase = serde_json::from_str(r#"{"featured_crop": "rice"}"#).unwrap();
        assert_eq!(kb.featured_crop, "rice");
        assert_eq!(kb.pests.len(), 4);
        assert_eq!(kb.intents.weather.len(), 4);
    }

    #[test]
    fn test_localized_pest_text() {
        let kb = KnowledgeBase::default();
        let aphids = kb.pests.iter().find(|p| p.key == "aphids").unwrap();
        assert_eq!(aphids.name(Language::English), "Aphids");
        assert_eq!(aphids.name(Language::Hindi), "माहू/एफिड्स");
    }
}
