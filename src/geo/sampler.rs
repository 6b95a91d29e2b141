use crate::error::GeometryError;
use crate::geo::geometry::{cumulative_distances, distance};
use crate::models::Coordinates;

/// Distance-based lookups along a decoded route path.
///
/// Holds the cumulative distance to every vertex so repeated anchor lookups
/// don't re-walk the path.
#[derive(Debug)]
pub struct PathSampler<'a> {
    path: &'a [Coordinates],
    cumulative: Vec<f64>,
}

impl<'a> PathSampler<'a> {
    /// Fails unless the path has at least 2 points and a finite length.
    pub fn new(path: &'a [Coordinates]) -> Result<Self, GeometryError> {
        if path.len() < 2 {
            return Err(GeometryError::TooFewPoints { count: path.len() });
        }

        let cumulative = cumulative_distances(path);
        let total = cumulative.last().copied().unwrap_or(0.0);
        if !total.is_finite() {
            return Err(GeometryError::DegenerateLength {
                length_meters: total,
            });
        }

        Ok(PathSampler { path, cumulative })
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    fn first(&self) -> Coordinates {
        self.path[0]
    }

    fn last(&self) -> Coordinates {
        self.path[self.path.len() - 1]
    }

    /// Point `target_meters` along the path, linearly interpolated in
    /// lat/lng space within the containing segment. Targets outside
    /// `[0, total_length]` clamp to the endpoints.
    pub fn point_at_distance(&self, target_meters: f64) -> Coordinates {
        if target_meters <= 0.0 || target_meters.is_nan() {
            return self.first();
        }
        if target_meters >= self.total_length() {
            return self.last();
        }

        let (segment, fraction) = self.locate(target_meters);
        self.path[segment].lerp(&self.path[segment + 1], fraction)
    }

    /// Segment index and in-segment fraction for a target strictly inside
    /// `(0, total_length)`.
    fn locate(&self, target_meters: f64) -> (usize, f64) {
        // First vertex at or beyond the target; never 0 since cumulative[0] == 0 < target
        let end = self
            .cumulative
            .partition_point(|&traveled| traveled < target_meters)
            .clamp(1, self.path.len() - 1);
        let start = end - 1;

        let segment_length = self.cumulative[end] - self.cumulative[start];
        let remaining = target_meters - self.cumulative[start];
        let fraction = if segment_length > 0.0 {
            (remaining / segment_length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (start, fraction)
    }

    /// Path vertices spaced at least `step_meters` apart, starting with the
    /// first point and ending with the last one when `max_points` allows.
    pub fn sample_every(&self, step_meters: f64, max_points: usize) -> Vec<Coordinates> {
        let max_points = max_points.max(1);
        let mut samples = vec![self.first()];
        let mut since_last = 0.0;

        for pair in self.path.windows(2) {
            if samples.len() >= max_points {
                break;
            }
            since_last += distance(&pair[0], &pair[1]);
            if since_last >= step_meters {
                samples.push(pair[1]);
                since_last = 0.0;
            }
        }

        if samples.last() != Some(&self.last()) && samples.len() < max_points {
            samples.push(self.last());
        }

        samples
    }
}
