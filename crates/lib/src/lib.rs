//! # Study Aid Generation
//!
//! This crate provides the core of the `studygen` service: turning the text of
//! an uploaded lesson into study material (notes, flashcards, quizzes) via a
//! configurable AI provider. It owns the mode catalogue, the prompt builder,
//! the provider clients, and the per-session state machine.

pub mod errors;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod types;

pub use errors::{GenerationError, SessionError};
pub use session::{generate_study_aid, SessionPhase, StudySession};
pub use types::{Document, GenerationResult, HistoryEntry, Mode, ResultKind};

/// Returns a prefix of `text` that is at most `limit` characters long.
///
/// The cut is made on a character boundary, so multi-byte text is never
/// split mid-codepoint. Used to bound the document text forwarded into a
/// prompt, keeping requests under the upstream size limits.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
