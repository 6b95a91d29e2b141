//! Stable application-wide constants.
//!
//! Values here are structural invariants of the route bucketing and ranking
//! pipeline, plus default fallbacks for env-var-based configuration.
//! Per-deployment tuning lives in [`PipelineConfig`](crate::config::PipelineConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Collaborator defaults ---

/// Timeout applied to every outbound routing / place search call.
pub const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 10;
/// Deadline for one whole pipeline run, after which in-flight calls are dropped.
pub const DEFAULT_PIPELINE_TIMEOUT_SECONDS: u64 = 25;
/// Routing API accepts at most 25 intermediate waypoints.
pub const MAX_INTERMEDIATES: usize = 25;

// --- Geometry ---

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
/// Fixed-point scale of the encoded polyline format (5 decimal places).
pub const POLYLINE_PRECISION: u32 = 5;

// --- Time windows (seconds from departure / before arrival) ---

/// En-route window: 45 to 60 minutes after departure.
pub const EN_ROUTE_WINDOW_SECONDS: (f64, f64) = (2_700.0, 3_600.0);
/// Near-destination window: 30 to 20 minutes before arrival.
pub const NEAR_DESTINATION_LEAD_SECONDS: (f64, f64) = (1_800.0, 1_200.0);

/// Distance fractions used when the route has no usable duration.
pub const EN_ROUTE_FALLBACK_FRACTIONS: (f64, f64) = (0.40, 0.50);
pub const NEAR_DESTINATION_FALLBACK_FRACTIONS: (f64, f64) = (0.85, 0.92);

// --- Search defaults ---

/// Roughly 20 miles.
pub const DEFAULT_EN_ROUTE_RADIUS_METERS: f64 = 32_187.0;
/// Roughly 15 miles, tighter to bias toward the destination side.
pub const DEFAULT_NEAR_DESTINATION_RADIUS_METERS: f64 = 24_000.0;
/// Upper bound on a nearby-search circle radius.
pub const MAX_SEARCH_RADIUS_METERS: f64 = 50_000.0;
pub const DEFAULT_MAX_RESULTS_PER_QUERY: u32 = 15;
/// Places nearby search returns at most 20 results per call.
pub const MAX_RESULTS_PER_QUERY_LIMIT: u32 = 20;
pub const DEFAULT_MAX_CATEGORIES_PER_BUCKET: usize = 3;

// --- Ranking ---

pub const DEFAULT_RESULT_LIMIT: i64 = 12;
pub const MIN_RESULT_LIMIT: usize = 1;
pub const MAX_RESULT_LIMIT: usize = 30;

// --- Route preview ---

pub const DEFAULT_PREVIEW_STEP_METERS: f64 = 5_000.0;
pub const DEFAULT_PREVIEW_MAX_POINTS: usize = 200;
