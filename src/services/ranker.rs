use crate::constants::{MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};
use crate::models::{BucketKind, PoiRecord};
use crate::services::poi_aggregator::MergedBucket;
use std::collections::HashSet;

/// Final per-list recommendations, deduplicated across lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedLists {
    pub en_route: Vec<PoiRecord>,
    pub near_destination: Vec<PoiRecord>,
}

impl RankedLists {
    fn list_mut(&mut self, kind: BucketKind) -> &mut Vec<PoiRecord> {
        match kind {
            BucketKind::EnRoute => &mut self.en_route,
            BucketKind::NearDestination => &mut self.near_destination,
        }
    }
}

pub struct Ranker {
    limit: usize,
}

impl Ranker {
    /// `requested_limit` is clamped to [1, 30], never rejected.
    pub fn new(requested_limit: i64) -> Self {
        let limit = requested_limit.clamp(MIN_RESULT_LIMIT as i64, MAX_RESULT_LIMIT as i64) as usize;
        Ranker { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Sorts by score descending and keeps the top `limit`. The sort is
    /// stable, so equal scores keep provider order.
    pub fn rank_bucket(&self, mut records: Vec<PoiRecord>) -> Vec<PoiRecord> {
        records.sort_by(|a, b| b.score().total_cmp(&a.score()));
        records.truncate(self.limit);
        records
    }

    /// Ranks every bucket, then drops ids already claimed by a bucket earlier
    /// in [`BucketKind::DEDUP_PRIORITY`].
    pub fn rank(&self, buckets: Vec<MergedBucket>) -> RankedLists {
        let mut buckets = buckets;
        let mut seen: HashSet<String> = HashSet::new();
        let mut lists = RankedLists::default();

        for kind in BucketKind::DEDUP_PRIORITY {
            let records = match buckets.iter().position(|b| b.kind == kind) {
                Some(index) => buckets.swap_remove(index).into_records(),
                None => Vec::new(),
            };

            let ranked = self.rank_bucket(records);
            let before = ranked.len();
            let kept: Vec<PoiRecord> = ranked
                .into_iter()
                .filter(|record| seen.insert(record.id.clone()))
                .collect();

            if kept.len() < before {
                tracing::debug!(
                    bucket = %kind,
                    dropped = before - kept.len(),
                    "Dropped {} places already claimed by a higher-priority bucket",
                    before - kept.len()
                );
            }

            *lists.list_mut(kind) = kept;
        }

        lists
    }
}
