use axum::Router;
use roadside::config::Config;
use roadside::services::{
    GooglePlacesClient, GoogleRoutesClient, PlaceSearchProvider, RoutingProvider,
    ThingsToDoPipeline,
};
use roadside::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadside=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Roadside API server");
    tracing::info!(
        en_route_radius_m = config.pipeline.en_route_radius_m,
        near_destination_radius_m = config.pipeline.near_destination_radius_m,
        provider_timeout_s = config.provider_timeout_secs,
        pipeline_timeout_s = config.pipeline_timeout_secs,
        "Configuration loaded successfully"
    );

    // Initialize providers
    let api_key = config.google_maps_api_key.clone();
    let routing: Arc<dyn RoutingProvider> = match config.routes_base_url {
        Some(ref base_url) => Arc::new(GoogleRoutesClient::with_base_url(
            api_key.clone(),
            base_url.clone(),
            config.provider_timeout(),
        )?),
        None => Arc::new(GoogleRoutesClient::new(api_key.clone(), config.provider_timeout())?),
    };
    let places: Arc<dyn PlaceSearchProvider> = match config.places_base_url {
        Some(ref base_url) => Arc::new(GooglePlacesClient::with_base_url(
            api_key,
            base_url.clone(),
            config.provider_timeout(),
        )?),
        None => Arc::new(GooglePlacesClient::new(api_key, config.provider_timeout())?),
    };

    // Create application state
    let state = Arc::new(AppState {
        pipeline: ThingsToDoPipeline::new(routing, places, config.pipeline.clone()),
        pipeline_timeout: config.pipeline_timeout(),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", roadside::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
