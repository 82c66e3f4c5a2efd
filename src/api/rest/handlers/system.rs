use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::shared::models::constants::{API_VERSION, SERVICE_NAME};

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": format!("{SERVICE_NAME} API is running!"),
        "version": API_VERSION
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
