use thiserror::Error;

use super::state::SessionStatus;

/// Contract errors surfaced across the controller's public API
///
/// Engine failures never appear here; they are classified and land in the
/// session snapshot's `error` field instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a capture session is already open")]
    AlreadyOpen,

    #[error("speech recognition is not available")]
    UnsupportedEngine,

    #[error("no capture session is open")]
    NoSession,

    #[error("{operation} requires the {expected} state, but the session is {actual}")]
    InvalidState {
        operation: &'static str,
        expected: SessionStatus,
        actual: SessionStatus,
    },

    #[error("the speech engine is already running")]
    EngineActive,

    #[error("retry requires the idle state with a retryable error")]
    NotRetryable,
}
