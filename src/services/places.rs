use crate::error::{AppError, ProviderError, Result};
use crate::models::{Coordinates, PoiRecord};
use crate::services::routes_api::LatLng;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PLACES_API_BASE_URL: &str = "https://places.googleapis.com";
const SEARCH_NEARBY_PATH: &str = "/v1/places:searchNearby";
const PLACES_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.location,places.types,places.rating,places.userRatingCount";
const PROVIDER: &str = "places";

/// One nearby-search query around an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub center: Coordinates,
    pub radius_meters: f64,
    pub categories: Vec<String>,
    pub max_results: u32,
}

#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Places around `search.center`, in provider relevance order. An empty
    /// result is not an error.
    async fn search_nearby(
        &self,
        search: &NearbySearch,
    ) -> std::result::Result<Vec<PoiRecord>, ProviderError>;
}

/// Places API (nearby search) client.
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, PLACES_API_BASE_URL.to_string(), timeout)
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build places client: {}", e)))?;

        Ok(GooglePlacesClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaceSearchProvider for GooglePlacesClient {
    async fn search_nearby(
        &self,
        search: &NearbySearch,
    ) -> std::result::Result<Vec<PoiRecord>, ProviderError> {
        let url = format!("{}{}", self.base_url, SEARCH_NEARBY_PATH);
        let body = SearchNearbyRequest {
            included_types: &search.categories,
            max_result_count: search.max_results,
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: (&search.center).into(),
                    radius: search.radius_meters,
                },
            },
        };

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PLACES_FIELD_MASK)
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
            tracing::warn!(status = %status, "Places API HTTP error {}: {}", status, text);
            return Err(ProviderError::upstream(
                PROVIDER,
                format!("HTTP {}: {}", status, text),
            ));
        }

        let parsed: SearchNearbyResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::bad_response(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        let returned = parsed.places.len();
        let records: Vec<PoiRecord> = parsed
            .places
            .into_iter()
            .filter_map(Place::into_record)
            .collect();

        tracing::debug!(
            lat = search.center.lat,
            lng = search.center.lng,
            radius_m = search.radius_meters,
            returned,
            kept = records.len(),
            "Places nearby search returned {} places",
            records.len()
        );

        Ok(records)
    }
}

// Places API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchNearbyRequest<'a> {
    included_types: &'a [String],
    max_result_count: u32,
    location_restriction: LocationRestriction,
}

#[derive(Debug, Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Debug, Serialize)]
struct Circle {
    center: LatLng,
    radius: f64,
}

#[derive(Debug, Deserialize)]
struct SearchNearbyResponse {
    /// Omitted entirely when nothing matched
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Place {
    id: Option<String>,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    location: Option<LatLng>,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

impl Place {
    /// Places without an id or location can't be deduplicated or shown.
    fn into_record(self) -> Option<PoiRecord> {
        let (Some(id), Some(location)) = (self.id, self.location) else {
            tracing::warn!("Skipping place without id or location");
            return None;
        };

        Some(PoiRecord {
            name: self
                .display_name
                .map(|n| n.text)
                .unwrap_or_else(|| id.clone()),
            id,
            address: self.formatted_address.unwrap_or_default(),
            coordinates: Coordinates {
                lat: location.latitude,
                lng: location.longitude,
            },
            categories: self.types.into_iter().collect(),
            rating: self.rating,
            vote_count: self.user_rating_count,
        })
    }
}
