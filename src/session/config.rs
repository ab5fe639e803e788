use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing configuration for capture sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause between stopping capture and entering review, in milliseconds.
    /// Smooths the UI transition; nothing algorithmic depends on it.
    pub review_delay_ms: u64,

    /// Quiet window before an interim result becomes visible, in
    /// milliseconds. Coalesces rapid partial updates into one preview.
    pub interim_debounce_ms: u64,

    /// Whether a transient engine error schedules one automatic retry
    pub auto_retry: bool,

    /// Delay before the automatic retry, in milliseconds
    pub auto_retry_delay_ms: u64,

    /// Stop capture automatically after this much silence while listening.
    /// Disabled when unset.
    pub silence_timeout_ms: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            review_delay_ms: 800,
            interim_debounce_ms: 150,
            auto_retry: true,
            auto_retry_delay_ms: 2000,
            silence_timeout_ms: None,
        }
    }
}

impl SessionConfig {
    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review_delay_ms)
    }

    pub fn interim_debounce(&self) -> Duration {
        Duration::from_millis(self.interim_debounce_ms)
    }

    pub fn auto_retry_delay(&self) -> Duration {
        Duration::from_millis(self.auto_retry_delay_ms)
    }

    pub fn silence_timeout(&self) -> Option<Duration> {
        self.silence_timeout_ms.map(Duration::from_millis)
    }
}
