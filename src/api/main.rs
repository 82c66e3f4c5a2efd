use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[path = "../api/mod.rs"]
mod api;
#[path = "../shared/mod.rs"]
mod shared;

use shared::models::constants::DEFAULT_WEATHER_API_URL;

#[derive(Parser)]
#[command(name = "farmassist-api")]
#[command(about = "FarmAssist - agricultural assistant REST API for farmers")]
struct Args {
    /// Address to bind
    #[arg(long, env = "FARMASSIST_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// OpenWeatherMap API key; demo weather is served when unset
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    openweather_api_key: Option<String>,

    /// OpenWeatherMap API base URL
    #[arg(long, env = "OPENWEATHER_API_URL", default_value = DEFAULT_WEATHER_API_URL)]
    weather_api_url: String,

    /// JSON file overriding the built-in knowledge tables and advisory thresholds
    #[arg(long, env = "FARMASSIST_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, env = "FARMASSIST_LOG_DIR", default_value = "logs")]
    log_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guards = shared::logging::init_service_logging(&args.log_dir, "farmassist_api")?;

    let settings = shared::config::ServerSettings {
        host: args.host,
        port: args.port,
        weather_api_url: args.weather_api_url,
        openweather_api_key: args.openweather_api_key,
        config_path: args.config,
    };

    api::rest::api::run_rest_server(settings).await
}
