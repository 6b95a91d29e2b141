use crate::error::ProviderError;
use crate::models::{BucketKind, BucketPlan, PoiRecord};
use crate::services::places::{NearbySearch, PlaceSearchProvider};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Records collected for one bucket, unique by id.
///
/// Order is first appearance across the bucket's queries (low anchor first,
/// then provider order). A repeated id replaces the earlier record in place.
#[derive(Debug, Clone)]
pub struct MergedBucket {
    pub kind: BucketKind,
    records: Vec<PoiRecord>,
    positions: HashMap<String, usize>,
}

impl MergedBucket {
    pub fn new(kind: BucketKind) -> Self {
        MergedBucket {
            kind,
            records: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn insert(&mut self, record: PoiRecord) {
        match self.positions.get(&record.id) {
            Some(&position) => self.records[position] = record,
            None => {
                self.positions.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn records(&self) -> &[PoiRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PoiRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs the nearby searches for every bucket anchor and merges the results
/// per bucket.
pub struct PoiAggregator {
    places: Arc<dyn PlaceSearchProvider>,
    max_results: u32,
    query_timeout: Duration,
}

impl PoiAggregator {
    pub fn new(places: Arc<dyn PlaceSearchProvider>, max_results: u32, query_timeout: Duration) -> Self {
        PoiAggregator {
            places,
            max_results,
            query_timeout,
        }
    }

    /// One merged bucket per plan, in plan order.
    ///
    /// All anchor queries run concurrently; the first failure aborts the
    /// whole aggregation and drops the queries still in flight.
    pub async fn aggregate(
        &self,
        plans: &[BucketPlan],
    ) -> std::result::Result<Vec<MergedBucket>, ProviderError> {
        let searches: Vec<(usize, NearbySearch)> = plans
            .iter()
            .enumerate()
            .flat_map(|(bucket, plan)| {
                plan.anchors.iter().map(move |anchor| {
                    (
                        bucket,
                        NearbySearch {
                            center: *anchor,
                            radius_meters: plan.radius_meters,
                            categories: plan.included_categories.clone(),
                            max_results: self.max_results,
                        },
                    )
                })
            })
            .collect();

        tracing::debug!("Issuing {} nearby searches", searches.len());

        let results = try_join_all(
            searches
                .iter()
                .map(|(_, search)| self.search_with_timeout(search)),
        )
        .await?;

        let mut merged: Vec<MergedBucket> =
            plans.iter().map(|plan| MergedBucket::new(plan.label)).collect();
        for ((bucket, _), records) in searches.iter().zip(results) {
            for record in records {
                merged[*bucket].insert(record);
            }
        }

        for bucket in &merged {
            tracing::debug!(
                bucket = %bucket.kind,
                places = bucket.len(),
                "Merged {} unique places for {}",
                bucket.len(),
                bucket.kind
            );
        }

        Ok(merged)
    }

    async fn search_with_timeout(
        &self,
        search: &NearbySearch,
    ) -> std::result::Result<Vec<PoiRecord>, ProviderError> {
        match tokio::time::timeout(self.query_timeout, self.places.search_nearby(search)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    lat = search.center.lat,
                    lng = search.center.lng,
                    "Nearby search timed out after {:?}",
                    self.query_timeout
                );
                Err(ProviderError::transport(
                    "places",
                    format!("Nearby search timed out after {:?}", self.query_timeout),
                ))
            }
        }
    }
}
