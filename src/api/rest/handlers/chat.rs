use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::rest::error::{ApiError, ApiResult};
use crate::shared::models::constants::DEFAULT_LOCATION;
use crate::shared::models::{AppState, Language};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub is_alert: bool,
    pub timestamp: String,
}

/// Answers a farmer's chat message. A message that is missing, empty, or
/// only whitespace is rejected with 400.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(req) = payload?;

    let message = req
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message required".to_string()))?;
    let language = Language::from_code(req.language.as_deref());
    let location = req.location.as_deref().unwrap_or(DEFAULT_LOCATION);

    let is_alert = state.distress.is_distressed(message);
    if is_alert {
        info!("Chat message flagged for distress, replying with helplines");
    }

    let reply = state
        .composer
        .compose_reply(message, language, location, is_alert)
        .await?;

    Ok(Json(ChatResponse {
        reply,
        is_alert,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
