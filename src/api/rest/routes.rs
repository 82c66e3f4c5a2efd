use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::rest::{handlers, logging_middleware::request_logging_middleware};
use crate::shared::models::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::system::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/detect_pest", post(handlers::pests::detect_pest))
        .route("/weather_alert", get(handlers::weather::weather_alert))
        .with_state(state);

    Router::new()
        .route("/", get(handlers::system::home))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use tower::ServiceExt;

    use crate::shared::config::FarmConfig;
    use crate::shared::weather::WeatherClient;

    fn app() -> Router {
        let weather = WeatherClient::new("http://unused.invalid", None).unwrap();
        create_router(Arc::new(AppState::new(FarmConfig::default(), weather)))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_home_and_health() {
        let (status, body) = send(app(), get_req("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "FarmAssist API is running!");
        assert_eq!(body["version"], "1.0");

        let (status, body) = send(app(), get_req("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chat_requires_message() {
        let (status, body) = send(app(), post_json("/api/chat", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message required");

        let (status, _) = send(app(), post_json("/api/chat", json!({"message": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_json() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_chat_distress_sets_alert() {
        let (status, body) = send(
            app(),
            post_json("/api/chat", json!({"message": "weather is hopeless"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_alert"], true);
        assert!(body["reply"].as_str().unwrap().contains("1800-180-1551"));
    }

    #[tokio::test]
    async fn test_chat_price_reply() {
        let (status, body) = send(
            app(),
            post_json("/api/chat", json!({"message": "wheat price", "language": "en"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_alert"], false);
        let reply = body["reply"].as_str().unwrap();
        assert!(reply.contains("₹2150"));
        assert!(reply.contains("↑3.2%"));
    }

    #[tokio::test]
    async fn test_chat_bad_location_for_weather() {
        let (status, body) = send(
            app(),
            post_json("/api/chat", json!({"message": "weather", "location": "delhi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("delhi"));
    }

    #[tokio::test]
    async fn test_detect_pest_returns_known_pest() {
        let names: HashSet<String> = FarmConfig::default()
            .knowledge
            .pests
            .iter()
            .map(|p| p.name_hi.clone())
            .collect();

        let (status, body) = send(
            app(),
            post_json("/api/detect_pest", json!({"image": "aGVsbG8="})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(names.contains(body["pest_name"].as_str().unwrap()));
        assert!(body["treatment"].is_string());
        assert_eq!(body["confidence"], 0.85);
    }

    #[tokio::test]
    async fn test_detect_pest_ignores_image_shape() {
        for body in [json!({"image": null}), json!({"image": 123}), json!({})] {
            let (status, body) = send(app(), post_json("/api/detect_pest", body)).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body["pest_name"].is_string());
            assert_eq!(body["confidence"], 0.85);
        }
    }

    #[tokio::test]
    async fn test_weather_alert_defaults_to_demo_weather() {
        let (status, body) = send(app(), get_req("/api/weather_alert")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "normal");
        assert_eq!(body["source"], "demo");
        assert_eq!(body["weather"]["temperature"], 32.0);
        assert_eq!(body["weather"]["humidity"], 65);
        assert_eq!(body["alert"], "🌤️ मौसम सामान्य (32°C)। नियमित देखभाल करें।");
    }

    #[tokio::test]
    async fn test_weather_alert_rejects_bad_coordinates() {
        let (status, body) = send(app(), get_req("/api/weather_alert?lat=abc&lon=77")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid lat 'abc'");

        let (status, _) = send(app(), get_req("/api/weather_alert?lat=28&lon=200")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
