use anyhow::Result;

use super::{EngineFactory, SpeechEngine};

/// Factory for hosts with no speech recognition engine
///
/// Construction always fails, which the session controller reports as an
/// unsupported-engine error.
pub struct UnavailableEngineFactory;

impl EngineFactory for UnavailableEngineFactory {
    fn create(&self) -> Result<Box<dyn SpeechEngine>> {
        anyhow::bail!("No speech recognition engine is available on this host")
    }
}
