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
        // Session control
        .route("/session/open", post(handlers::open_session))
        .route("/session/start", post(handlers::start_capture))
        .route("/session/stop", post(handlers::stop_capture))
        .route("/session/edit", post(handlers::edit_transcript))
        .route("/session/approve", post(handlers::approve_capture))
        .route("/session/retry", post(handlers::retry_capture))
        .route("/session/cancel", post(handlers::cancel_capture))
        // Engine event ingestion
        .route("/session/events", post(handlers::push_engine_events))
        // Session queries
        .route("/session", get(handlers::get_session))
        .route("/session/stats", get(handlers::get_session_stats))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
