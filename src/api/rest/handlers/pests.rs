use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::rest::error::ApiResult;
use crate::shared::models::{AppState, Language};

#[derive(Debug, Deserialize)]
pub struct DetectPestRequest {
    /// Base64 photo from the client. Any JSON value is accepted since the
    /// simulated classifier never inspects it.
    #[serde(default)]
    pub image: Option<serde_json::Value>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetectPestResponse {
    pub pest_name: String,
    pub treatment: String,
    pub confidence: f64,
}

pub async fn detect_pest(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DetectPestRequest>, JsonRejection>,
) -> ApiResult<Json<DetectPestResponse>> {
    let Json(req) = payload?;
    let language = Language::from_code(req.language.as_deref());

    let image = req.image.as_ref().and_then(serde_json::Value::as_str);
    let detection = state.pest_classifier.classify(image).await?;

    Ok(Json(DetectPestResponse {
        pest_name: detection.pest.name(language).to_string(),
        treatment: detection.pest.treatment(language).to_string(),
        confidence: detection.confidence,
    }))
}
