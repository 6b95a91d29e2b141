use crate::error::{AppError, ProviderError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ROUTES_API_BASE_URL: &str = "https://routes.googleapis.com";
const COMPUTE_ROUTES_PATH: &str = "/directions/v2:computeRoutes";
const ROUTES_FIELD_MASK: &str =
    "routes.distanceMeters,routes.duration,routes.polyline.encodedPolyline";
const PROVIDER: &str = "routing";

/// A driving route as returned by the routing collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRoute {
    pub encoded_path: String,
    pub distance_meters: u64,
    /// `None` when the provider omits or garbles the duration
    pub duration_seconds: Option<u64>,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn compute_route(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        intermediates: &[Coordinates],
    ) -> std::result::Result<ComputedRoute, ProviderError>;
}

/// Routes API client for driving directions.
#[derive(Clone)]
pub struct GoogleRoutesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleRoutesClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, ROUTES_API_BASE_URL.to_string(), timeout)
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build routes client: {}", e)))?;

        Ok(GoogleRoutesClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RoutingProvider for GoogleRoutesClient {
    async fn compute_route(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        intermediates: &[Coordinates],
    ) -> std::result::Result<ComputedRoute, ProviderError> {
        let url = format!("{}{}", self.base_url, COMPUTE_ROUTES_PATH);
        let body = ComputeRoutesRequest {
            origin: Waypoint::from(origin),
            destination: Waypoint::from(destination),
            intermediates: intermediates.iter().map(Waypoint::from).collect(),
            travel_mode: "DRIVE",
        };

        tracing::debug!(
            intermediates = intermediates.len(),
            "Routes API request: ({:.4}, {:.4}) -> ({:.4}, {:.4}) via {} stops",
            origin.lat, origin.lng, destination.lat, destination.lng, intermediates.len()
        );

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", ROUTES_FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::transport(PROVIDER, "Request timed out")
                } else {
                    ProviderError::transport(PROVIDER, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Routes API HTTP error {}: {}", status, text);
            return Err(ProviderError::upstream(
                PROVIDER,
                format!("HTTP {}: {}", status, text),
            ));
        }

        let parsed: ComputeRoutesResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::bad_response(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        let route = parsed.routes.into_iter().next().ok_or_else(|| {
            tracing::warn!("Routes API returned 0 routes");
            ProviderError::upstream(PROVIDER, "No route found between origin and destination")
        })?;

        let duration_seconds = route.duration.as_deref().and_then(parse_duration_seconds);
        if duration_seconds.is_none() {
            tracing::warn!(
                raw = ?route.duration,
                "Routes API response has no usable duration"
            );
        }

        tracing::debug!(
            distance_km = %format!("{:.1}", route.distance_meters as f64 / 1000.0),
            duration_s = ?duration_seconds,
            "Routes API response: {:.1}km",
            route.distance_meters as f64 / 1000.0
        );

        Ok(ComputedRoute {
            encoded_path: route.polyline.encoded_polyline,
            distance_meters: route.distance_meters,
            duration_seconds,
        })
    }
}

/// Parses protobuf duration strings such as `"1234s"` or `"12.5s"`.
fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let seconds: f64 = raw.trim().strip_suffix('s')?.parse().ok()?;
    if seconds.is_finite() && seconds >= 0.0 {
        Some(seconds.round() as u64)
    } else {
        None
    }
}

// Routes API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    intermediates: Vec<Waypoint>,
    travel_mode: &'static str,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Coordinates> for LatLng {
    fn from(c: &Coordinates) -> Self {
        LatLng {
            latitude: c.lat,
            longitude: c.lng,
        }
    }
}

impl From<&Coordinates> for Waypoint {
    fn from(c: &Coordinates) -> Self {
        Waypoint {
            location: Location { lat_lng: c.into() },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteEntry {
    #[serde(default)]
    distance_meters: u64,
    duration: Option<String>,
    polyline: EncodedPolyline,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncodedPolyline {
    encoded_polyline: String,
}
