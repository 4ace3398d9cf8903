use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recorder control
        .route("/recorder/start", post(handlers::start_recording))
        .route("/recorder/pause", post(handlers::pause_recording))
        .route("/recorder/stop", post(handlers::stop_recording))
        .route("/recorder/play", post(handlers::play_recording))
        .route("/recorder/interrupt", post(handlers::interrupt_recording))
        // Queries
        .route("/recorder/status", get(handlers::get_status))
        .route("/recordings", get(handlers::list_recordings))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
