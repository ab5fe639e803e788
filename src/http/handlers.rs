use super::state::AppState;
use crate::engine::EngineEvent;
use crate::merge::TemplateId;
use crate::session::{JournalField, SessionError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    /// Journal field the capture targets
    pub field: JournalField,

    /// Current text of that field (the merge target)
    #[serde(default)]
    pub field_text: String,

    /// Template currently loaded into the field, if any
    pub template: Option<TemplateId>,
}

#[derive(Debug, Serialize)]
pub struct OpenSessionResponse {
    pub session_id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTranscriptRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct EngineEventsRequest {
    pub events: Vec<EngineEvent>,
}

#[derive(Debug, Serialize)]
pub struct EngineEventsResponse {
    pub accepted: usize,
    pub dropped: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a controller contract error to an HTTP status
fn error_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::AlreadyOpen => StatusCode::CONFLICT,
        SessionError::UnsupportedEngine => StatusCode::SERVICE_UNAVAILABLE,
        SessionError::NoSession => StatusCode::NOT_FOUND,
        SessionError::InvalidState { .. }
        | SessionError::EngineActive
        | SessionError::NotRetryable => StatusCode::CONFLICT,
    }
}

fn error_response(err: SessionError) -> axum::response::Response {
    (
        error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /session/open
/// Open a capture session for a journal field
pub async fn open_session(
    State(state): State<AppState>,
    Json(req): Json<OpenSessionRequest>,
) -> impl IntoResponse {
    match state
        .controller
        .open(req.field, req.field_text, req.template)
        .await
    {
        Ok(session_id) => (
            StatusCode::OK,
            Json(OpenSessionResponse {
                session_id,
                status: "open".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /session/start
/// Start capturing speech for the open session
pub async fn start_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.start().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "starting".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /session/stop
/// Stop capturing and move toward review
pub async fn stop_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.stop().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "processing".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /session/edit
/// Replace the transcript under review
pub async fn edit_transcript(
    State(state): State<AppState>,
    Json(req): Json<EditTranscriptRequest>,
) -> impl IntoResponse {
    match state.controller.edit_transcript(req.text).await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "reviewing".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /session/approve
/// Merge the reviewed transcript and return the new field text
pub async fn approve_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.approve().await {
        Ok(approved) => {
            info!("Capture approved for {:?}", approved.field);
            (StatusCode::OK, Json(approved)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// POST /session/retry
/// Retry after a retryable engine error
pub async fn retry_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.retry().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "starting".to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /session/cancel
/// Tear the session down without touching the journal field
pub async fn cancel_capture(State(state): State<AppState>) -> impl IntoResponse {
    state.controller.cancel().await;
    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "cancelled".to_string(),
        }),
    )
        .into_response()
}

/// POST /session/events
/// Push recognition engine events from the host
pub async fn push_engine_events(
    State(state): State<AppState>,
    Json(req): Json<EngineEventsRequest>,
) -> impl IntoResponse {
    let mut accepted = 0;
    let mut dropped = 0;
    for event in req.events {
        if state.engine.push(event).await {
            accepted += 1;
        } else {
            dropped += 1;
        }
    }
    (StatusCode::OK, Json(EngineEventsResponse { accepted, dropped })).into_response()
}

/// GET /session
/// Snapshot of the open session for rendering
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.snapshot().await {
        Some(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no capture session is open".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /session/stats
/// Statistics for the open session
pub async fn get_session_stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.stats().await {
        Some(stats) => (StatusCode::OK, Json(stats)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no capture session is open".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
