//! Recording session management
//!
//! This module provides the capture state machine that coordinates:
//! - Engine lifecycle (start/stop/restart) through the engine boundary
//! - Transcript accumulation and interim-preview debouncing
//! - Error classification and the single automatic retry
//! - The review step and the final template merge
//!
//! At most one session is open at a time; every timer and pending engine
//! event is invalidated the moment the session is cancelled or replaced.

mod config;
mod controller;
mod error;
mod state;

pub use config::SessionConfig;
pub use controller::SessionController;
pub use error::SessionError;
pub use state::{ApprovedCapture, JournalField, SessionSnapshot, SessionStats, SessionStatus};
