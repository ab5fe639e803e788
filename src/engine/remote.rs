//! Event-fed engine implementation
//!
//! The host UI owns the actual recognizer and pushes its lifecycle and
//! result events into the service through a [`RemoteEngineHandle`]. The
//! engine side only manages the channel that carries them.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use super::{EngineEvent, EngineFactory, SpeechEngine};

/// Capacity of the engine event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Push side of a [`RemoteEngine`], shared with the HTTP layer
#[derive(Clone, Default)]
pub struct RemoteEngineHandle {
    sender: Arc<Mutex<Option<mpsc::Sender<EngineEvent>>>>,
}

impl RemoteEngineHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one engine event toward the active session
    ///
    /// Returns false when no engine is active (the event is dropped).
    pub async fn push(&self, event: EngineEvent) -> bool {
        let sender = {
            let guard = match self.sender.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.clone()
        };

        match sender {
            Some(sender) => {
                if sender.send(event).await.is_err() {
                    debug!("Engine event dropped: receiver gone");
                    return false;
                }
                true
            }
            None => {
                debug!("Engine event dropped: no active engine");
                false
            }
        }
    }

    fn install(&self, sender: Option<mpsc::Sender<EngineEvent>>) {
        let mut guard = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = sender;
    }
}

/// Engine whose events arrive from outside the process
pub struct RemoteEngine {
    handle: RemoteEngineHandle,
}

#[async_trait::async_trait]
impl SpeechEngine for RemoteEngine {
    async fn begin(&mut self) -> Result<mpsc::Receiver<EngineEvent>> {
        // Installing a new sender closes any previous event channel.
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.handle.install(Some(tx));
        Ok(rx)
    }

    async fn end(&mut self) -> Result<()> {
        self.handle.install(None);
        Ok(())
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Factory producing [`RemoteEngine`]s that all share one push handle
pub struct RemoteEngineFactory {
    handle: RemoteEngineHandle,
}

impl RemoteEngineFactory {
    /// Create the factory together with the handle the host pushes into
    pub fn new() -> (Self, RemoteEngineHandle) {
        let handle = RemoteEngineHandle::new();
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }
}

impl EngineFactory for RemoteEngineFactory {
    fn create(&self) -> Result<Box<dyn SpeechEngine>> {
        Ok(Box::new(RemoteEngine {
            handle: self.handle.clone(),
        }))
    }
}
