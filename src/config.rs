use crate::constants::*;
use crate::models::MoodTable;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_maps_api_key: String,
    /// Override for the Routes API base URL (proxies, tests)
    pub routes_base_url: Option<String>,
    /// Override for the Places API base URL (proxies, tests)
    pub places_base_url: Option<String>,
    pub provider_timeout_secs: u64,
    pub pipeline_timeout_secs: u64,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Search radius around the en-route anchors
    pub en_route_radius_m: f64,

    /// Search radius around the near-destination anchors
    pub near_destination_radius_m: f64,

    /// `maxResults` sent with every nearby search
    pub max_results_per_query: u32,

    /// Distinct categories kept per bucket to bound query fan-out
    pub max_categories_per_bucket: usize,

    /// Timeout for a single nearby search, enforced by the aggregator
    pub query_timeout: Duration,

    /// Spacing of the route preview returned to clients
    pub preview_step_m: f64,

    /// Cap on route preview points
    pub preview_max_points: usize,

    /// Mood -> place categories
    pub moods: MoodTable,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            en_route_radius_m: DEFAULT_EN_ROUTE_RADIUS_METERS,
            near_destination_radius_m: DEFAULT_NEAR_DESTINATION_RADIUS_METERS,
            max_results_per_query: DEFAULT_MAX_RESULTS_PER_QUERY,
            max_categories_per_bucket: DEFAULT_MAX_CATEGORIES_PER_BUCKET,
            query_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECONDS),
            preview_step_m: DEFAULT_PREVIEW_STEP_METERS,
            preview_max_points: DEFAULT_PREVIEW_MAX_POINTS,
            moods: MoodTable::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let en_route_radius_m: f64 = env::var("EN_ROUTE_RADIUS_M")
            .unwrap_or_else(|_| defaults.en_route_radius_m.to_string())
            .parse()
            .map_err(|_| "Invalid EN_ROUTE_RADIUS_M")?;
        validate_radius("EN_ROUTE_RADIUS_M", en_route_radius_m)?;

        let near_destination_radius_m: f64 = env::var("NEAR_DESTINATION_RADIUS_M")
            .unwrap_or_else(|_| defaults.near_destination_radius_m.to_string())
            .parse()
            .map_err(|_| "Invalid NEAR_DESTINATION_RADIUS_M")?;
        validate_radius("NEAR_DESTINATION_RADIUS_M", near_destination_radius_m)?;

        let max_results_per_query: u32 = env::var("MAX_RESULTS_PER_QUERY")
            .unwrap_or_else(|_| defaults.max_results_per_query.to_string())
            .parse()
            .map_err(|_| "Invalid MAX_RESULTS_PER_QUERY")?;
        if !(1..=MAX_RESULTS_PER_QUERY_LIMIT).contains(&max_results_per_query) {
            return Err(format!(
                "MAX_RESULTS_PER_QUERY must be between 1 and {}",
                MAX_RESULTS_PER_QUERY_LIMIT
            ));
        }

        let max_categories_per_bucket: usize = env::var("MAX_CATEGORIES_PER_BUCKET")
            .unwrap_or_else(|_| defaults.max_categories_per_bucket.to_string())
            .parse()
            .map_err(|_| "Invalid MAX_CATEGORIES_PER_BUCKET")?;
        if max_categories_per_bucket == 0 {
            return Err("MAX_CATEGORIES_PER_BUCKET must be at least 1".to_string());
        }

        let preview_step_m: f64 = env::var("PREVIEW_STEP_M")
            .unwrap_or_else(|_| defaults.preview_step_m.to_string())
            .parse()
            .map_err(|_| "Invalid PREVIEW_STEP_M")?;
        if !(preview_step_m > 0.0 && preview_step_m.is_finite()) {
            return Err("PREVIEW_STEP_M must be a positive number".to_string());
        }

        Ok(Self {
            en_route_radius_m,
            near_destination_radius_m,
            max_results_per_query,
            max_categories_per_bucket,
            query_timeout: defaults.query_timeout,
            preview_step_m,
            preview_max_points: env::var("PREVIEW_MAX_POINTS")
                .unwrap_or_else(|_| defaults.preview_max_points.to_string())
                .parse()
                .map_err(|_| "Invalid PREVIEW_MAX_POINTS")?,
            moods: defaults.moods,
        })
    }
}

fn validate_radius(name: &str, radius_m: f64) -> Result<(), String> {
    if radius_m <= 0.0 || radius_m > MAX_SEARCH_RADIUS_METERS || radius_m.is_nan() {
        return Err(format!(
            "{} must be between 0 and {} meters",
            name, MAX_SEARCH_RADIUS_METERS
        ));
    }
    Ok(())
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let provider_timeout_secs: u64 = env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_PROVIDER_TIMEOUT_SECONDS.to_string())
            .parse()
            .map_err(|_| "Invalid PROVIDER_TIMEOUT_SECS")?;
        if provider_timeout_secs == 0 {
            return Err("PROVIDER_TIMEOUT_SECS must be at least 1".to_string());
        }

        let pipeline_timeout_secs: u64 = env::var("PIPELINE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_PIPELINE_TIMEOUT_SECONDS.to_string())
            .parse()
            .map_err(|_| "Invalid PIPELINE_TIMEOUT_SECS")?;
        if pipeline_timeout_secs == 0 {
            return Err("PIPELINE_TIMEOUT_SECS must be at least 1".to_string());
        }

        let mut pipeline = PipelineConfig::from_env()?;
        pipeline.query_timeout = Duration::from_secs(provider_timeout_secs);

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .map_err(|_| "GOOGLE_MAPS_API_KEY must be set")?,
            routes_base_url: env::var("ROUTES_API_BASE_URL").ok(),
            places_base_url: env::var("PLACES_API_BASE_URL").ok(),
            provider_timeout_secs,
            pipeline_timeout_secs,
            pipeline,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn pipeline_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline_timeout_secs)
    }
}
