use async_trait::async_trait;
use roadside::config::PipelineConfig;
use roadside::error::ProviderError;
use roadside::models::{Coordinates, PoiRecord};
use roadside::services::{
    ComputedRoute, NearbySearch, PlaceSearchProvider, RoutingProvider, ThingsToDoPipeline,
};
use roadside::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const EN_ROUTE_RADIUS: f64 = 32_187.0;
#[allow(dead_code)]
pub const NEAR_DESTINATION_RADIUS: f64 = 24_000.0;

/// Routing fake that always answers with the same route (or error) and
/// remembers the waypoints it was asked for.
#[allow(dead_code)]
pub struct StaticRouting {
    answer: Result<ComputedRoute, ProviderError>,
    pub calls: Mutex<Vec<(Coordinates, Coordinates, Vec<Coordinates>)>>,
}

#[allow(dead_code)]
impl StaticRouting {
    pub fn new(route: ComputedRoute) -> Self {
        StaticRouting {
            answer: Ok(route),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        StaticRouting {
            answer: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RoutingProvider for StaticRouting {
    async fn compute_route(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        intermediates: &[Coordinates],
    ) -> Result<ComputedRoute, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((*origin, *destination, intermediates.to_vec()));
        self.answer.clone()
    }
}

type Script = dyn Fn(&NearbySearch) -> Result<Vec<PoiRecord>, ProviderError> + Send + Sync;

/// Place search fake driven by a closure; records every search.
#[allow(dead_code)]
pub struct ScriptedPlaces {
    script: Box<Script>,
    delay: Duration,
    pub searches: Mutex<Vec<NearbySearch>>,
}

#[allow(dead_code)]
impl ScriptedPlaces {
    pub fn new(
        script: impl Fn(&NearbySearch) -> Result<Vec<PoiRecord>, ProviderError> + Send + Sync + 'static,
    ) -> Self {
        ScriptedPlaces {
            script: Box::new(script),
            delay: Duration::ZERO,
            searches: Mutex::new(Vec::new()),
        }
    }

    /// Answers by bucket, telling buckets apart by their default radius.
    pub fn by_bucket(en_route: Vec<PoiRecord>, near_destination: Vec<PoiRecord>) -> Self {
        Self::new(move |search| {
            if search.radius_meters == EN_ROUTE_RADIUS {
                Ok(en_route.clone())
            } else {
                Ok(near_destination.clone())
            }
        })
    }

    pub fn empty() -> Self {
        Self::new(|_| Ok(Vec::new()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PlaceSearchProvider for ScriptedPlaces {
    async fn search_nearby(&self, search: &NearbySearch) -> Result<Vec<PoiRecord>, ProviderError> {
        self.searches.lock().unwrap().push(search.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.script)(search)
    }
}

/// Encodes a path with the 1e5-precision polyline algorithm.
#[allow(dead_code)]
pub fn encode_polyline(path: &[Coordinates]) -> String {
    let mut encoded = String::new();
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);

    for point in path {
        let lat = (point.lat * 1e5).round() as i64;
        let lng = (point.lng * 1e5).round() as i64;
        encode_value(lat - prev_lat, &mut encoded);
        encode_value(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = (if value < 0 { !(value << 1) } else { value << 1 }) as u64;
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

/// Straight equator route from (0, 0) to (0, 1), about 111 km.
#[allow(dead_code)]
pub fn equator_route(duration_seconds: Option<u64>) -> ComputedRoute {
    ComputedRoute {
        encoded_path: encode_polyline(&[
            Coordinates { lat: 0.0, lng: 0.0 },
            Coordinates { lat: 0.0, lng: 0.5 },
            Coordinates { lat: 0.0, lng: 1.0 },
        ]),
        distance_meters: 111_195,
        duration_seconds,
    }
}

#[allow(dead_code)]
pub fn poi(id: &str, rating: f64, votes: u32) -> PoiRecord {
    PoiRecord::new(id, format!("Place {}", id), Coordinates { lat: 0.0, lng: 0.5 })
        .with_rating(rating, votes)
}

#[allow(dead_code)]
pub fn test_pipeline(
    routing: Arc<dyn RoutingProvider>,
    places: Arc<dyn PlaceSearchProvider>,
) -> ThingsToDoPipeline {
    ThingsToDoPipeline::new(routing, places, PipelineConfig::default())
}

#[allow(dead_code)]
pub fn test_state(
    routing: Arc<dyn RoutingProvider>,
    places: Arc<dyn PlaceSearchProvider>,
    pipeline_timeout: Duration,
) -> Arc<AppState> {
    Arc::new(AppState {
        pipeline: test_pipeline(routing, places),
        pipeline_timeout,
    })
}

#[allow(dead_code)]
pub fn ids(records: &[PoiRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
