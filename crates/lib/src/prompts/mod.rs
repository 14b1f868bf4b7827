//! # Prompt Construction
//!
//! This module owns the per-mode instruction templates and the single place
//! where an instruction and a document's text are combined into the prompt
//! sent to the AI provider.

pub mod templates;

use crate::truncate_chars;
use crate::types::Mode;
pub use templates::*;

/// The delimiter placed between the instruction and the lesson text.
pub const LESSON_DELIMITER: &str = "\n\n# Lesson Content\n";

/// Returns the built-in instruction template for a mode.
///
/// The match is exhaustive, so adding a `Mode` variant without a template is a
/// compile error rather than a runtime miss.
pub fn default_instruction(mode: Mode) -> &'static str {
    match mode {
        Mode::StructuredNotes => STRUCTURED_NOTES_INSTRUCTION,
        Mode::Flashcards => FLASHCARDS_INSTRUCTION,
        Mode::ExamPredictions => EXAM_PREDICTIONS_INSTRUCTION,
        Mode::FastReview => FAST_REVIEW_INSTRUCTION,
        Mode::Quiz => QUIZ_INSTRUCTION,
    }
}

/// Builds the final prompt: instruction, delimiter, then the document text
/// truncated to at most `limit` characters.
///
/// Truncation is applied to the document text before concatenation, so the
/// instruction is never cut and the forwarded text is always a prefix of the
/// extracted text.
pub fn build_prompt(instruction: &str, document_text: &str, limit: usize) -> String {
    let lesson = truncate_chars(document_text, limit);
    let mut prompt = String::with_capacity(instruction.len() + LESSON_DELIMITER.len() + lesson.len());
    prompt.push_str(instruction);
    prompt.push_str(LESSON_DELIMITER);
    prompt.push_str(lesson);
    prompt
}
