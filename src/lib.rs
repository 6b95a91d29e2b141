// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use services::ThingsToDoPipeline;
use std::time::Duration;

// App state for sharing across the application
pub struct AppState {
    pub pipeline: ThingsToDoPipeline,
    /// Deadline for a whole request, on top of per-query timeouts
    pub pipeline_timeout: Duration,
}
