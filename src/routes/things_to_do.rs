use crate::error::{AppError, Result};
use crate::models::{RankedResult, ThingsToDoRequest};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /things-to-do
/// Recommend places along a driving route and around its destination
pub async fn find_things_to_do(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ThingsToDoRequest>,
) -> Result<Json<RankedResult>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        start_lat = request.start.lat,
        start_lng = request.start.lng,
        dest_lat = request.destination.lat,
        dest_lng = request.destination.lng,
        mood = %request.mood,
        limit = request.limit,
        "Things-to-do request: ({:.4}, {:.4}) -> ({:.4}, {:.4}), mood={}, limit={}",
        request.start.lat, request.start.lng,
        request.destination.lat, request.destination.lng,
        request.mood, request.limit
    );

    let result = tokio::time::timeout(state.pipeline_timeout, state.pipeline.run(&request))
        .await
        .map_err(|_| {
            tracing::warn!("Things-to-do request exceeded {:?}", state.pipeline_timeout);
            AppError::Timeout(format!(
                "Request did not complete within {:?}",
                state.pipeline_timeout
            ))
        })??;

    Ok(Json(result))
}
