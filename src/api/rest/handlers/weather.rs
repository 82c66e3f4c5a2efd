use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::rest::error::{ApiError, ApiResult};
use crate::shared::advisory::AlertTier;
use crate::shared::models::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::shared::models::{AppState, Language};
use crate::shared::weather::WeatherObservation;

#[derive(Debug, Deserialize)]
pub struct WeatherAlertQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeatherAlertResponse {
    pub alert: String,
    pub advisory: String,
    pub tier: AlertTier,
    pub weather: WeatherObservation,
    pub source: &'static str,
}

pub async fn weather_alert(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherAlertQuery>,
) -> ApiResult<Json<WeatherAlertResponse>> {
    let lat = parse_coordinate("lat", query.lat.as_deref(), DEFAULT_LATITUDE, 90.0)?;
    let lon = parse_coordinate("lon", query.lon.as_deref(), DEFAULT_LONGITUDE, 180.0)?;
    let language = Language::from_code(query.language.as_deref());

    let lookup = state.weather.get_weather(lat, lon).await;
    let weather = lookup.observation();
    let policy = &state.policy;

    Ok(Json(WeatherAlertResponse {
        alert: policy.alert_text(weather.temperature, language),
        advisory: policy.rain_advisory(&weather, language),
        tier: policy.classify_temperature(weather.temperature),
        source: lookup.source(),
        weather,
    }))
}

fn parse_coordinate(name: &str, raw: Option<&str>, default: f64, bound: f64) -> ApiResult<f64> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };

    raw.parse::<f64>()
        .ok()
        .filter(|v| (-bound..=bound).contains(v))
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid {name} '{raw}'")))
}
