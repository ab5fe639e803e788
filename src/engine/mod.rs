//! Speech recognition engine boundary
//!
//! The engine itself is a black box: it is started and stopped through
//! [`SpeechEngine`] and reports everything else back as [`EngineEvent`]s on
//! a channel. Implementations:
//! - `RemoteEngine`: fed by the host over HTTP (the host owns the actual
//!   recognizer and pushes its events in)
//! - `UnavailableEngineFactory`: a factory that always fails construction,
//!   for hosts without any recognition engine

pub mod remote;
pub mod unavailable;

pub use remote::{RemoteEngine, RemoteEngineFactory, RemoteEngineHandle};
pub use unavailable::UnavailableEngineFactory;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One unit of recognized text delivered by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedSegment {
    /// Recognized text, raw as the engine produced it
    pub text: String,
    /// Final (confirmed, immutable) vs interim (provisional preview)
    #[serde(rename = "final")]
    pub is_final: bool,
}

impl RecognizedSegment {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Events emitted by a running engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The engine acknowledged `begin()` and is capturing
    Started,
    /// A batch of recognition results
    Result { segments: Vec<RecognizedSegment> },
    /// The engine reported a failure; `code` is classified by the caller
    Error { code: String },
    /// The engine stopped on its own
    Ended,
}

/// Speech recognition engine lifecycle
#[async_trait::async_trait]
pub trait SpeechEngine: Send {
    /// Start recognition
    ///
    /// Returns a channel receiver that will receive engine events. The
    /// channel closes when the engine is ended or replaced.
    async fn begin(&mut self) -> Result<mpsc::Receiver<EngineEvent>>;

    /// Stop recognition
    async fn end(&mut self) -> Result<()>;

    /// Get engine name for logging
    fn name(&self) -> &str;
}

/// Constructs one engine per capture attempt
///
/// Construction failure means no engine exists on this host (feature
/// detection failed), which the session controller surfaces as a fatal,
/// non-retryable error.
pub trait EngineFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn SpeechEngine>>;
}
