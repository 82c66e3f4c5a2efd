use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::rest::create_router;
use crate::shared::config::ServerSettings;
use crate::shared::init_state;
use crate::shared::models::constants::{API_VERSION, SERVICE_NAME};

pub async fn run_rest_server(settings: ServerSettings) -> Result<()> {
    ctrlc::set_handler(|| {
        info!("Shutting down {} API...", SERVICE_NAME);
        std::process::exit(0);
    })?;

    info!(
        r#"
 _____                      _            _     _
|  ___|_ _ _ __ _ __ ___   / \   ___ ___(_)___| |_
| |_ / _` | '__| '_ ` _ \ / _ \ / __/ __| / __| __|
|  _| (_| | |  | | | | | / ___ \\__ \__ \ \__ \ |_
|_|  \__,_|_|  |_| |_| |_/_/   \_\___/___/_|___/\__|

Starting {} API v{} (PID {})
"#,
        SERVICE_NAME,
        API_VERSION,
        std::process::id()
    );

    let app_state = match init_state(&settings) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to initialize application state: {:#}", e);
            return Err(e);
        }
    };

    info!(
        pests = app_state.knowledge.pests.len(),
        prices = app_state.knowledge.prices.len(),
        distress_keywords = app_state.distress.keywords().len(),
        classifier = app_state.pest_classifier.name(),
        "Knowledge tables loaded"
    );
    if !app_state.weather.has_api_key() {
        warn!("OPENWEATHER_API_KEY not set, weather responses will use demo data");
    }

    let app = create_router(app_state);

    let bind_addr = format!("{}:{}", settings.host, settings.port);
    info!("Binding to: {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("REST API Endpoint: http://{}/api", bind_addr);
    info!("Ready to accept requests...");

    axum::serve(listener, app).await?;
    Ok(())
}
