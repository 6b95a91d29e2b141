use crate::constants::{DEFAULT_RESULT_LIMIT, MAX_INTERMEDIATES};
use crate::models::{BucketPlan, Coordinates, Mood, PoiRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThingsToDoRequest {
    pub start: Coordinates,
    pub destination: Coordinates,
    #[serde(default = "default_mood")]
    pub mood: String,
    /// Requested results per list; clamped to [1, 30] by the ranker
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Optional intermediate stops forwarded to the routing provider
    #[serde(default)]
    pub via: Vec<Coordinates>,
}

fn default_mood() -> String {
    Mood::default().to_string()
}

fn default_limit() -> i64 {
    DEFAULT_RESULT_LIMIT
}

impl ThingsToDoRequest {
    pub fn new(start: Coordinates, destination: Coordinates) -> Self {
        ThingsToDoRequest {
            start,
            destination,
            mood: default_mood(),
            limit: default_limit(),
            via: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        Coordinates::new(self.start.lat, self.start.lng).map_err(|e| format!("start: {}", e))?;
        Coordinates::new(self.destination.lat, self.destination.lng)
            .map_err(|e| format!("destination: {}", e))?;

        if self.via.len() > MAX_INTERMEDIATES {
            return Err(format!(
                "At most {} via points allowed, got {}",
                MAX_INTERMEDIATES,
                self.via.len()
            ));
        }
        for (i, point) in self.via.iter().enumerate() {
            Coordinates::new(point.lat, point.lng).map_err(|e| format!("via[{}]: {}", i, e))?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    /// Mood actually used (unrecognized input resolves to scenic)
    pub mood: Mood,
    pub en_route: Vec<PoiRecord>,
    pub near_destination: Vec<PoiRecord>,
    pub counts: ResultCounts,
    pub route: RouteSummary,
    pub buckets: Vec<BucketPlan>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultCounts {
    pub en_route: usize,
    pub near_destination: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Distance reported by the routing provider
    pub distance_meters: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    /// Haversine length of the decoded path
    pub path_length_meters: f64,
    /// Evenly spaced points along the route
    pub preview: Vec<Coordinates>,
}
