pub mod health;
pub mod things_to_do;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/things-to-do", post(things_to_do::find_things_to_do))
        .route("/health", get(health::health_check))
        .with_state(state)
}
