pub mod classifier;
pub mod config;
pub mod engine;
pub mod http;
pub mod merge;
pub mod session;
pub mod transcript;

pub use classifier::{classify, ClassifiedError, ErrorKind};
pub use config::Config;
pub use engine::{
    EngineEvent, EngineFactory, RecognizedSegment, RemoteEngine, RemoteEngineFactory,
    RemoteEngineHandle, SpeechEngine, UnavailableEngineFactory,
};
pub use http::{create_router, AppState};
pub use merge::{merge_transcript, TemplateId};
pub use session::{
    ApprovedCapture, JournalField, SessionConfig, SessionController, SessionError,
    SessionSnapshot, SessionStats, SessionStatus,
};
pub use transcript::TranscriptAssembler;
