//! Error classifier for engine-reported failures
//!
//! Maps the engine's error code strings to a user-facing message and a
//! retryable flag. The mapping is total: unrecognized codes get a generic,
//! retryable classification rather than an error.

use serde::{Deserialize, Serialize};

/// Category of a classified engine failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Microphone permission was denied
    PermissionDenied,
    /// No usable capture device
    DeviceUnavailable,
    /// The recognition service refused the request
    ServiceUnavailable,
    /// Short-lived failure, worth retrying
    Transient,
    /// No recognition engine exists on this host
    Unsupported,
    /// Unrecognized engine error code
    Unknown,
}

/// A classified engine failure, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl ClassifiedError {
    fn new(kind: ErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }
}

/// Classify an engine error code
pub fn classify(code: &str) -> ClassifiedError {
    match code {
        "not-allowed" => ClassifiedError::new(
            ErrorKind::PermissionDenied,
            "Microphone access was denied. Allow microphone permission in your browser settings and try again.",
            false,
        ),
        "audio-capture" => ClassifiedError::new(
            ErrorKind::DeviceUnavailable,
            "No microphone was found. Check that a microphone is connected and working.",
            false,
        ),
        "service-not-allowed" => ClassifiedError::new(
            ErrorKind::ServiceUnavailable,
            "The speech recognition service is not available right now.",
            false,
        ),
        "network" => ClassifiedError::new(
            ErrorKind::Transient,
            "A network problem interrupted speech recognition. Check your connection and try again.",
            true,
        ),
        "no-speech" => ClassifiedError::new(
            ErrorKind::Transient,
            "No speech was detected. Try speaking closer to the microphone.",
            true,
        ),
        "aborted" => ClassifiedError::new(
            ErrorKind::Transient,
            "Speech recognition was interrupted. Try again.",
            true,
        ),
        other => ClassifiedError::new(
            ErrorKind::Unknown,
            format!("Speech recognition failed ({}). Please try again.", other),
            true,
        ),
    }
}

/// Classification for a host where no recognition engine exists at all.
///
/// This case never arrives as an engine error code; it is detected before
/// the engine can be constructed.
pub fn unsupported() -> ClassifiedError {
    ClassifiedError::new(
        ErrorKind::Unsupported,
        "Speech recognition is not supported in this environment.",
        false,
    )
}
