use crate::config::PipelineConfig;
use crate::error::Result;
use crate::geo::{polyline, PathSampler};
use crate::models::{Mood, RankedResult, ResultCounts, RouteSummary, ThingsToDoRequest};
use crate::services::bucket_planner::BucketPlanner;
use crate::services::places::PlaceSearchProvider;
use crate::services::poi_aggregator::PoiAggregator;
use crate::services::ranker::Ranker;
use crate::services::routes_api::RoutingProvider;
use std::sync::Arc;
use tracing::instrument;

/// Route -> buckets -> nearby searches -> ranked recommendations.
pub struct ThingsToDoPipeline {
    routing: Arc<dyn RoutingProvider>,
    aggregator: PoiAggregator,
    config: PipelineConfig,
}

impl ThingsToDoPipeline {
    pub fn new(
        routing: Arc<dyn RoutingProvider>,
        places: Arc<dyn PlaceSearchProvider>,
        config: PipelineConfig,
    ) -> Self {
        let aggregator =
            PoiAggregator::new(places, config.max_results_per_query, config.query_timeout);

        ThingsToDoPipeline {
            routing,
            aggregator,
            config,
        }
    }

    /// Any provider, decode or geometry failure fails the whole request;
    /// partial results are never returned.
    #[instrument(skip(self, request), fields(mood = %request.mood, limit = request.limit))]
    pub async fn run(&self, request: &ThingsToDoRequest) -> Result<RankedResult> {
        let mood = Mood::resolve(Some(request.mood.as_str()));
        let ranker = Ranker::new(request.limit);

        let route = self
            .routing
            .compute_route(&request.start, &request.destination, &request.via)
            .await?;

        let path = polyline::decode(&route.encoded_path)?;
        let sampler = PathSampler::new(&path)?;
        let path_length = sampler.total_length();

        tracing::info!(
            points = path.len(),
            path_km = %format!("{:.1}", path_length / 1000.0),
            provider_km = %format!("{:.1}", route.distance_meters as f64 / 1000.0),
            duration_s = ?route.duration_seconds,
            "Route decoded: {} points, {:.1}km",
            path.len(),
            path_length / 1000.0
        );

        let buckets = BucketPlanner::new(&self.config).plan(
            &sampler,
            route.duration_seconds,
            path_length,
            mood,
        );

        let merged = self.aggregator.aggregate(&buckets).await?;
        let lists = ranker.rank(merged);

        let counts = ResultCounts {
            en_route: lists.en_route.len(),
            near_destination: lists.near_destination.len(),
        };

        tracing::info!(
            en_route = counts.en_route,
            near_destination = counts.near_destination,
            "Ranked {} en-route and {} near-destination places (mood={})",
            counts.en_route,
            counts.near_destination,
            mood
        );

        let preview = sampler.sample_every(self.config.preview_step_m, self.config.preview_max_points);

        Ok(RankedResult {
            mood,
            en_route: lists.en_route,
            near_destination: lists.near_destination,
            counts,
            route: RouteSummary {
                distance_meters: route.distance_meters,
                duration_seconds: route.duration_seconds,
                path_length_meters: path_length,
                preview,
            },
            buckets,
        })
    }
}
