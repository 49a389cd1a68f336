use crate::handlers::health::health_check;
use crate::schemas::AppState;
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Create application router: health check plus the frontend bundle
///
/// Paths that match no file are answered with `index.html` so the single-page
/// app can be reloaded at any URL.
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.assets_dir).fallback(ServeFile::new(state.index_path()));

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
