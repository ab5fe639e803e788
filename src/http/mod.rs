//! HTTP API server for the host UI
//!
//! This module provides a REST API for driving a capture session:
//! - POST /session/open - Open a session for a journal field
//! - POST /session/start - Start capturing
//! - POST /session/stop - Stop capturing and move toward review
//! - POST /session/edit - Replace the transcript under review
//! - POST /session/approve - Merge and return the new field text
//! - POST /session/retry - Retry after a retryable error
//! - POST /session/cancel - Tear the session down
//! - POST /session/events - Push engine events (started/result/error/ended)
//! - GET /session - Session snapshot for rendering
//! - GET /session/stats - Session statistics
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
