use crate::constants::EARTH_RADIUS_METERS;
use crate::models::Coordinates;

/// Great-circle distance between two coordinates in meters (haversine).
pub fn distance(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Total length of a path in meters; 0 for fewer than two points.
pub fn path_length(path: &[Coordinates]) -> f64 {
    path.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Distance traveled from `path[0]` to each vertex. Same length as `path`,
/// non-decreasing.
pub fn cumulative_distances(path: &[Coordinates]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(path.len());
    let mut traveled = 0.0;

    for (i, point) in path.iter().enumerate() {
        if i > 0 {
            traveled += distance(&path[i - 1], point);
        }
        cumulative.push(traveled);
    }

    cumulative
}
