use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named sub-segment of the route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    EnRoute,
    NearDestination,
}

impl BucketKind {
    /// Order in which buckets claim shared place ids during dedup.
    /// Destination-side results win over en-route ones.
    pub const DEDUP_PRIORITY: [BucketKind; 2] = [BucketKind::NearDestination, BucketKind::EnRoute];

    pub fn label(&self) -> &'static str {
        match self {
            BucketKind::EnRoute => "en_route",
            BucketKind::NearDestination => "near_destination",
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Search plan for one bucket: a low/high anchor pair along the route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketPlan {
    pub label: BucketKind,
    pub anchors: [Coordinates; 2],
    pub radius_meters: f64,
    pub included_categories: Vec<String>,
}
