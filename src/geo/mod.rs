//! Pure, synchronous geometry over route paths: polyline decoding, haversine
//! distances and distance-based sampling.

pub mod geometry;
pub mod polyline;
pub mod sampler;

pub use sampler::PathSampler;
