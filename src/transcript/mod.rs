//! Transcript assembly
//!
//! Pure accumulation and formatting of finalized recognition segments.
//! Interim segments never pass through here; they are previewed verbatim
//! by the session controller.

mod assembler;

pub use assembler::{polish_segment, TranscriptAssembler};
