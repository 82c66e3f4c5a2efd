// Service identity
pub const SERVICE_NAME: &str = "FarmAssist";
pub const API_VERSION: &str = "1.0";

// Default coordinates (New Delhi) used when a request carries no location
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.2090;
pub const DEFAULT_LOCATION: &str = "28.6139,77.2090";

// Demo weather returned whenever live data is unavailable
pub const DEMO_TEMPERATURE: f64 = 32.0;
pub const DEMO_HUMIDITY: u8 = 65;
pub const DEMO_DESCRIPTION: &str = "clear sky";

// Placeholder key shipped in sample environments; treated as "no key"
pub const DEMO_API_KEY: &str = "demo_key";

pub const DEFAULT_WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const WEATHER_TIMEOUT_SECS: u64 = 5;

// Advisory thresholds in degrees Celsius
pub const DEFAULT_HEAT_THRESHOLD: f64 = 35.0;
pub const DEFAULT_COLD_THRESHOLD: f64 = 10.0;
pub const DEFAULT_IRRIGATION_THRESHOLD: f64 = 30.0;

pub const PEST_CONFIDENCE: f64 = 0.85;
pub const DEFAULT_FEATURED_CROP: &str = "wheat";
