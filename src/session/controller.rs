use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classifier::{self, ClassifiedError};
use crate::engine::{EngineEvent, EngineFactory, SpeechEngine};
use crate::merge::{merge_transcript, TemplateId};
use crate::transcript::TranscriptAssembler;

use super::config::SessionConfig;
use super::error::SessionError;
use super::state::{ApprovedCapture, JournalField, SessionSnapshot, SessionStats, SessionStatus};

/// One capture attempt for a single journal field
struct ActiveSession {
    id: Uuid,
    field: JournalField,
    template: Option<TemplateId>,

    /// The field's text as captured at open(); the merge target. The
    /// controller never writes the field itself, so cancelling at any
    /// point leaves it untouched.
    field_text: String,

    status: SessionStatus,
    assembler: TranscriptAssembler,

    /// Debounced, UI-visible interim preview
    interim_text: String,
    /// Latest raw interim text, waiting out the debounce window
    pending_interim: String,
    /// Bumped on every interim update and on anything that supersedes one;
    /// a debounce timer only publishes if its sequence number is still
    /// current when it fires.
    interim_seq: u64,

    edited_transcript: Option<String>,
    error: Option<ClassifiedError>,
    auto_retry_used: bool,
    engine: Option<Box<dyn SpeechEngine>>,

    opened_at: DateTime<Utc>,
    interim_updates: u64,
    silence_seq: u64,
}

struct Inner {
    session: Option<ActiveSession>,
    /// Bumped whenever a session is created or destroyed. Timers and engine
    /// event pumps capture the epoch they were spawned under and are dropped
    /// on arrival if it no longer matches, so nothing can fire against a
    /// destroyed or replaced session.
    epoch: u64,
}

/// The recording session state machine
///
/// Owns at most one active session. Engine events, timer expiries and
/// caller-invoked operations all dispatch through the same mutex, so
/// transitions are serialized.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Mutex<Inner>>,
    config: SessionConfig,
    factory: Arc<dyn EngineFactory>,
}

impl SessionController {
    pub fn new(config: SessionConfig, factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: None,
                epoch: 0,
            })),
            config,
            factory,
        }
    }

    /// Open a capture session for `field`
    ///
    /// Captures the field's current text and active template id; both feed
    /// the merge at approval time. Fails when a session is already open;
    /// the caller must cancel it first.
    pub async fn open(
        &self,
        field: JournalField,
        field_text: String,
        template: Option<TemplateId>,
    ) -> Result<Uuid, SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.session.is_some() {
            return Err(SessionError::AlreadyOpen);
        }

        inner.epoch += 1;
        let id = Uuid::new_v4();
        info!("Opening capture session {} for {:?}", id, field);

        inner.session = Some(ActiveSession {
            id,
            field,
            template,
            field_text,
            status: SessionStatus::Idle,
            assembler: TranscriptAssembler::new(),
            interim_text: String::new(),
            pending_interim: String::new(),
            interim_seq: 0,
            edited_transcript: None,
            error: None,
            auto_retry_used: false,
            engine: None,
            opened_at: Utc::now(),
            interim_updates: 0,
            silence_seq: 0,
        });

        Ok(id)
    }

    /// Start capturing
    ///
    /// Constructs the engine and begins recognition. The session stays idle
    /// until the engine acknowledges with a `Started` event; only then does
    /// it become listening.
    pub async fn start(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        {
            let session = inner.session.as_mut().ok_or(SessionError::NoSession)?;
            if session.status != SessionStatus::Idle {
                return Err(SessionError::InvalidState {
                    operation: "start",
                    expected: SessionStatus::Idle,
                    actual: session.status,
                });
            }
            session.error = None;
        }
        self.begin_engine(&mut inner).await
    }

    /// Stop capturing and move toward review
    ///
    /// The interim preview is flushed and the engine stopped immediately;
    /// the session sits in `processing` for the configured delay before the
    /// transcript is handed over for review.
    pub async fn stop(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        let epoch = inner.epoch;
        let session = inner.session.as_mut().ok_or(SessionError::NoSession)?;
        if session.status != SessionStatus::Listening {
            return Err(SessionError::InvalidState {
                operation: "stop",
                expected: SessionStatus::Listening,
                actual: session.status,
            });
        }

        info!("Stopping capture for session {}", session.id);
        session.interim_seq += 1;
        session.interim_text.clear();
        session.pending_interim.clear();
        session.status = SessionStatus::Processing;

        if let Some(mut engine) = session.engine.take() {
            if let Err(e) = engine.end().await {
                warn!("Engine stop failed: {e:#}");
            }
        }

        let controller = self.clone();
        let delay = self.config.review_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = controller.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            let Some(session) = inner.session.as_mut() else {
                return;
            };
            if session.status != SessionStatus::Processing {
                return;
            }
            session.edited_transcript = Some(session.assembler.transcript().to_string());
            session.status = SessionStatus::Reviewing;
            info!("Session {} entered review", session.id);
        });

        Ok(())
    }

    /// Replace the transcript under review
    pub async fn edit_transcript(&self, text: String) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        let session = inner.session.as_mut().ok_or(SessionError::NoSession)?;
        if session.status != SessionStatus::Reviewing {
            return Err(SessionError::InvalidState {
                operation: "edit",
                expected: SessionStatus::Reviewing,
                actual: session.status,
            });
        }
        session.edited_transcript = Some(text);
        Ok(())
    }

    /// Approve the reviewed transcript
    ///
    /// Runs the template merge against the field text captured at open()
    /// and returns the replacement text; the session is destroyed. An
    /// approved transcript that was edited down to nothing leaves the field
    /// text unchanged.
    pub async fn approve(&self) -> Result<ApprovedCapture, SessionError> {
        let mut inner = self.inner.lock().await;
        {
            let session = inner.session.as_ref().ok_or(SessionError::NoSession)?;
            if session.status != SessionStatus::Reviewing {
                return Err(SessionError::InvalidState {
                    operation: "approve",
                    expected: SessionStatus::Reviewing,
                    actual: session.status,
                });
            }
        }

        inner.epoch += 1;
        let Some(session) = inner.session.take() else {
            return Err(SessionError::NoSession);
        };

        let transcript = session.edited_transcript.unwrap_or_default();
        let text = if transcript.trim().is_empty() {
            session.field_text
        } else {
            merge_transcript(&transcript, &session.field_text, session.template)
        };

        info!(
            "Session {} approved; merged {} final segments into {:?}",
            session.id,
            session.assembler.segment_count(),
            session.field
        );

        Ok(ApprovedCapture {
            field: session.field,
            text,
        })
    }

    /// Retry after a retryable engine error
    ///
    /// Equivalent to reopening the session for the same field: transcript
    /// state is reset and the engine started fresh. Re-arms the automatic
    /// retry, since this is an explicit user action.
    pub async fn retry(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        {
            let session = inner.session.as_mut().ok_or(SessionError::NoSession)?;
            let retryable = session.status == SessionStatus::Idle
                && session.error.as_ref().is_some_and(|e| e.retryable);
            if !retryable {
                return Err(SessionError::NotRetryable);
            }
            info!("Retrying capture session {}", session.id);
            Self::reset_for_restart(session);
            session.auto_retry_used = false;
        }
        self.begin_engine(&mut inner).await
    }

    /// Tear the session down from any state
    ///
    /// Stops the engine if running, invalidates every pending timer and
    /// in-flight engine event, and discards all session state. The target
    /// field is never touched. A no-op when no session is open.
    pub async fn cancel(&self) {
        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        if let Some(mut session) = inner.session.take() {
            info!("Cancelling capture session {}", session.id);
            if let Some(mut engine) = session.engine.take() {
                if let Err(e) = engine.end().await {
                    debug!("Engine stop on cancel: {e:#}");
                }
            }
        }
    }

    /// Read-only view of the active session, if any
    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        let inner = self.inner.lock().await;
        inner.session.as_ref().map(|session| SessionSnapshot {
            session_id: session.id,
            target_field: session.field,
            status: session.status,
            final_transcript: session.assembler.transcript().to_string(),
            interim_text: session.interim_text.clone(),
            edited_transcript: session.edited_transcript.clone(),
            error: session.error.clone(),
            active_template: session.template,
        })
    }

    /// Current session statistics, if a session is open
    pub async fn stats(&self) -> Option<SessionStats> {
        let inner = self.inner.lock().await;
        inner.session.as_ref().map(|session| {
            let duration = Utc::now().signed_duration_since(session.opened_at);
            SessionStats {
                session_id: session.id,
                status: session.status,
                opened_at: session.opened_at,
                duration_secs: duration.num_milliseconds() as f64 / 1000.0,
                final_segment_count: session.assembler.segment_count(),
                interim_update_count: session.interim_updates,
            }
        })
    }

    // ========================================================================
    // Engine lifecycle
    // ========================================================================

    /// Construct the engine and begin recognition
    ///
    /// Factory failure means the host has no recognition engine at all; it
    /// is recorded as a fatal classified error and the session stays idle.
    async fn begin_engine(&self, inner: &mut Inner) -> Result<(), SessionError> {
        let epoch = inner.epoch;
        let session = inner.session.as_mut().ok_or(SessionError::NoSession)?;
        if session.engine.is_some() {
            return Err(SessionError::EngineActive);
        }

        let mut engine = match self.factory.create() {
            Ok(engine) => engine,
            Err(e) => {
                warn!("No speech engine available: {e:#}");
                session.error = Some(classifier::unsupported());
                return Err(SessionError::UnsupportedEngine);
            }
        };

        match engine.begin().await {
            Ok(events) => {
                info!(
                    "Engine '{}' starting for session {}",
                    engine.name(),
                    session.id
                );
                session.engine = Some(engine);
                self.spawn_event_pump(events, epoch);
                Ok(())
            }
            Err(e) => {
                warn!("Engine failed to begin: {e:#}");
                session.error = Some(classifier::classify("audio-capture"));
                Err(SessionError::UnsupportedEngine)
            }
        }
    }

    /// Forward engine events into the state machine until the stream closes
    fn spawn_event_pump(&self, mut events: mpsc::Receiver<EngineEvent>, epoch: u64) {
        let controller = self.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                controller.handle_engine_event(event, epoch).await;
            }
            debug!("Engine event stream closed");
        });
    }

    /// Dispatch one engine event
    ///
    /// Events carry the epoch of the session they were captured under;
    /// anything from an older epoch belongs to a dead session and is dropped.
    async fn handle_engine_event(&self, event: EngineEvent, epoch: u64) {
        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            debug!("Dropping stale engine event: {:?}", event);
            return;
        }
        let Some(session) = inner.session.as_mut() else {
            return;
        };

        match event {
            EngineEvent::Started => {
                if session.status == SessionStatus::Idle && session.error.is_none() {
                    session.status = SessionStatus::Listening;
                    info!("Session {} listening", session.id);
                    self.arm_silence_timer(session, epoch);
                } else {
                    debug!("Ignoring engine start in {} state", session.status);
                }
            }

            EngineEvent::Result { segments } => {
                if session.status != SessionStatus::Listening {
                    debug!("Dropping {} segments in {} state", segments.len(), session.status);
                    return;
                }

                let mut interim: Option<String> = None;
                for segment in segments {
                    if segment.is_final {
                        // A finalized segment supersedes any pending preview.
                        session.interim_seq += 1;
                        session.interim_text.clear();
                        session.pending_interim.clear();
                        interim = None;
                        if session.assembler.push_final(&segment.text) {
                            debug!(
                                "Final segment appended ({} total)",
                                session.assembler.segment_count()
                            );
                        }
                    } else {
                        match &mut interim {
                            Some(text) => {
                                text.push(' ');
                                text.push_str(&segment.text);
                            }
                            None => interim = Some(segment.text),
                        }
                    }
                }

                if let Some(text) = interim {
                    session.pending_interim = text;
                    session.interim_seq += 1;
                    self.spawn_interim_publish(epoch, session.interim_seq);
                }

                self.arm_silence_timer(session, epoch);
            }

            EngineEvent::Error { code } => {
                let classified = classifier::classify(&code);
                warn!(
                    "Engine error '{}' for session {}: {} (retryable={})",
                    code, session.id, classified.message, classified.retryable
                );

                if let Some(mut engine) = session.engine.take() {
                    if let Err(e) = engine.end().await {
                        debug!("Engine stop after error: {e:#}");
                    }
                }

                session.interim_seq += 1;
                session.interim_text.clear();
                session.pending_interim.clear();
                session.edited_transcript = None;
                session.status = SessionStatus::Idle;

                let had_error = session.error.is_some();
                let retryable = classified.retryable;
                session.error = Some(classified);

                if retryable && self.config.auto_retry && !session.auto_retry_used && !had_error {
                    session.auto_retry_used = true;
                    self.spawn_auto_retry(epoch);
                }
            }

            EngineEvent::Ended => {
                if session.status == SessionStatus::Listening && session.error.is_none() {
                    // Engines routinely end themselves after short pauses;
                    // resume transparently without losing the transcript.
                    info!("Engine ended unexpectedly; restarting capture");
                    let restarted = match session.engine.as_mut() {
                        Some(engine) => engine.begin().await,
                        None => Err(anyhow::anyhow!("no engine to restart")),
                    };
                    match restarted {
                        Ok(events) => self.spawn_event_pump(events, epoch),
                        Err(e) => {
                            warn!("Engine restart failed: {e:#}");
                            session.engine = None;
                            session.status = SessionStatus::Idle;
                            session.error = Some(classifier::classify("audio-capture"));
                        }
                    }
                } else {
                    debug!("Ignoring engine end in {} state", session.status);
                }
            }
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Publish the pending interim preview once the debounce window passes
    /// with no newer update
    fn spawn_interim_publish(&self, epoch: u64, seq: u64) {
        let controller = self.clone();
        let debounce = self.config.interim_debounce();
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let mut inner = controller.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            let Some(session) = inner.session.as_mut() else {
                return;
            };
            if session.status != SessionStatus::Listening || session.interim_seq != seq {
                return;
            }
            session.interim_text = session.pending_interim.clone();
            session.interim_updates += 1;
        });
    }

    /// Schedule the single automatic retry after a transient error
    fn spawn_auto_retry(&self, epoch: u64) {
        let controller = self.clone();
        let delay = self.config.auto_retry_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = controller.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            let ready = inner.session.as_ref().is_some_and(|session| {
                session.status == SessionStatus::Idle
                    && session.error.as_ref().is_some_and(|e| e.retryable)
            });
            if !ready {
                return;
            }

            info!("Automatically retrying after transient engine error");
            if let Some(session) = inner.session.as_mut() {
                Self::reset_for_restart(session);
            }
            if let Err(e) = controller.begin_engine(&mut inner).await {
                warn!("Automatic retry failed: {}", e);
            }
        });
    }

    /// Arm (or re-arm) the optional silence auto-stop
    ///
    /// Any engine activity re-arms the timer; expiry behaves like stop().
    fn arm_silence_timer(&self, session: &mut ActiveSession, epoch: u64) {
        let Some(timeout) = self.config.silence_timeout() else {
            return;
        };
        session.silence_seq += 1;
        let seq = session.silence_seq;
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let expired = {
                let inner = controller.inner.lock().await;
                inner.epoch == epoch
                    && inner.session.as_ref().is_some_and(|session| {
                        session.status == SessionStatus::Listening && session.silence_seq == seq
                    })
            };
            if expired {
                info!("Silence timeout reached; stopping capture");
                if let Err(e) = controller.stop().await {
                    debug!("Silence auto-stop skipped: {}", e);
                }
            }
        });
    }

    /// Clear per-attempt state before the engine is started again
    fn reset_for_restart(session: &mut ActiveSession) {
        session.error = None;
        session.assembler = TranscriptAssembler::new();
        session.interim_seq += 1;
        session.interim_text.clear();
        session.pending_interim.clear();
        session.edited_transcript = None;
    }
}
