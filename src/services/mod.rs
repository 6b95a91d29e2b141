pub mod bucket_planner;
pub mod places;
pub mod poi_aggregator;
pub mod ranker;
pub mod routes_api;
pub mod things_to_do;

pub use places::{GooglePlacesClient, NearbySearch, PlaceSearchProvider};
pub use routes_api::{ComputedRoute, GoogleRoutesClient, RoutingProvider};
pub use things_to_do::ThingsToDoPipeline;
