pub mod bucket;
pub mod coordinates;
pub mod mood;
pub mod poi;
pub mod things_to_do;

pub use bucket::{BucketKind, BucketPlan};
pub use coordinates::Coordinates;
pub use mood::{Mood, MoodTable};
pub use poi::PoiRecord;
pub use things_to_do::{RankedResult, ResultCounts, RouteSummary, ThingsToDoRequest};
