use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A place returned by the place search collaborator.
///
/// `id` is the provider's stable place id and identifies the place across
/// queries and buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoiRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub categories: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u32>,
}

impl PoiRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        PoiRecord {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            coordinates,
            categories: BTreeSet::new(),
            rating: None,
            vote_count: None,
        }
    }

    pub fn with_rating(mut self, rating: f64, vote_count: u32) -> Self {
        self.rating = Some(rating);
        self.vote_count = Some(vote_count);
        self
    }

    /// Popularity-weighted rating: `rating * ln(votes + 1)`, 0 when either is missing.
    pub fn score(&self) -> f64 {
        let rating = self.rating.unwrap_or(0.0);
        let votes = f64::from(self.vote_count.unwrap_or(0));
        rating * (votes + 1.0).ln()
    }
}
