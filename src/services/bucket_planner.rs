use crate::config::PipelineConfig;
use crate::constants::*;
use crate::geo::PathSampler;
use crate::models::{BucketKind, BucketPlan, Mood};

/// Turns route duration and length into per-bucket search anchors.
pub struct BucketPlanner<'a> {
    config: &'a PipelineConfig,
}

impl<'a> BucketPlanner<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        BucketPlanner { config }
    }

    /// Plans the en-route and near-destination buckets, in that order.
    pub fn plan(
        &self,
        sampler: &PathSampler<'_>,
        total_duration_seconds: Option<u64>,
        total_length_meters: f64,
        mood: Mood,
    ) -> Vec<BucketPlan> {
        let categories = self
            .config
            .moods
            .categories_for(mood, self.config.max_categories_per_bucket);

        [BucketKind::EnRoute, BucketKind::NearDestination]
            .into_iter()
            .map(|kind| {
                let (low_m, high_m) =
                    anchor_distances(kind, total_duration_seconds, total_length_meters);
                let anchors = [
                    sampler.point_at_distance(low_m),
                    sampler.point_at_distance(high_m),
                ];

                tracing::debug!(
                    bucket = %kind,
                    low_m = %format!("{:.0}", low_m),
                    high_m = %format!("{:.0}", high_m),
                    "Planned {} anchors at {:.0}m and {:.0}m",
                    kind, low_m, high_m
                );

                BucketPlan {
                    label: kind,
                    anchors,
                    radius_meters: self.radius_for(kind),
                    included_categories: categories.clone(),
                }
            })
            .collect()
    }

    fn radius_for(&self, kind: BucketKind) -> f64 {
        match kind {
            BucketKind::EnRoute => self.config.en_route_radius_m,
            BucketKind::NearDestination => self.config.near_destination_radius_m,
        }
    }
}

/// Low/high distances along the route for a bucket, each in
/// `[0, total_length_meters]`.
///
/// With a known duration, time bounds map proportionally onto distance.
/// Without one (missing or 0) fixed distance fractions are used. Short
/// routes may collapse anchors onto an endpoint; that is accepted as is.
pub fn anchor_distances(
    kind: BucketKind,
    total_duration_seconds: Option<u64>,
    total_length_meters: f64,
) -> (f64, f64) {
    let (low_fraction, high_fraction) = match total_duration_seconds.filter(|&d| d > 0) {
        Some(duration) => {
            let duration = duration as f64;
            let (low_t, high_t) = match kind {
                BucketKind::EnRoute => EN_ROUTE_WINDOW_SECONDS,
                BucketKind::NearDestination => (
                    duration - NEAR_DESTINATION_LEAD_SECONDS.0,
                    duration - NEAR_DESTINATION_LEAD_SECONDS.1,
                ),
            };
            (
                (low_t / duration).clamp(0.0, 1.0),
                (high_t / duration).clamp(0.0, 1.0),
            )
        }
        None => match kind {
            BucketKind::EnRoute => EN_ROUTE_FALLBACK_FRACTIONS,
            BucketKind::NearDestination => NEAR_DESTINATION_FALLBACK_FRACTIONS,
        },
    };

    (
        low_fraction * total_length_meters,
        high_fraction * total_length_meters,
    )
}
