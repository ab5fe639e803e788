use crate::engine::RemoteEngineHandle;
use crate::session::SessionController;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single capture session controller
    pub controller: SessionController,
    /// Push side of the host-fed speech engine
    pub engine: RemoteEngineHandle,
}

impl AppState {
    pub fn new(controller: SessionController, engine: RemoteEngineHandle) -> Self {
        Self { controller, engine }
    }
}
