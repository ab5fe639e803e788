use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::ClassifiedError;
use crate::merge::TemplateId;

/// Journal field a capture session dictates into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalField {
    Reflections,
    Gratitude,
}

/// Capture session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Open but not capturing (initial state, and after an engine error)
    Idle,
    /// The engine is capturing and emitting results
    Listening,
    /// Capture stopped, waiting out the review-transition delay
    Processing,
    /// Transcript presented for editing and approval
    Reviewing,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Listening => "listening",
            SessionStatus::Processing => "processing",
            SessionStatus::Reviewing => "reviewing",
        };
        f.write_str(label)
    }
}

/// Read-only view of the active session for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub target_field: JournalField,
    pub status: SessionStatus,

    /// Punctuated running transcript built from finalized segments
    pub final_transcript: String,

    /// Debounced live preview; empty unless listening
    pub interim_text: String,

    /// User-editable transcript; present only while reviewing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_transcript: Option<String>,

    /// Classified engine failure; present only while idle after one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClassifiedError>,

    /// Template whose placeholders may still be in the target field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_template: Option<TemplateId>,
}

/// Statistics about a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: Uuid,

    pub status: SessionStatus,

    /// When the session was opened
    pub opened_at: DateTime<Utc>,

    /// Seconds since the session was opened
    pub duration_secs: f64,

    /// Number of finalized segments accumulated
    pub final_segment_count: usize,

    /// Number of interim previews that became visible
    pub interim_update_count: u64,
}

/// Result of approving a capture: the replacement text for the target field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedCapture {
    pub field: JournalField,
    pub text: String,
}
