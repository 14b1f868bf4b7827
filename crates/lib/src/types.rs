use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The extracted plain text of one uploaded PDF.
///
/// Created on upload and immutable afterwards; replaced wholesale by the next
/// upload and discarded when the session ends. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub page_count: usize,
}

/// The fixed catalogue of study outputs a user can request.
///
/// Each mode maps 1:1 to an instruction template in [`crate::prompts`], so a
/// selected mode can never be missing its instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    StructuredNotes,
    Flashcards,
    ExamPredictions,
    FastReview,
    Quiz,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::StructuredNotes,
        Mode::Flashcards,
        Mode::ExamPredictions,
        Mode::FastReview,
        Mode::Quiz,
    ];

    /// The snake_case name used in API payloads and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::StructuredNotes => "structured_notes",
            Mode::Flashcards => "flashcards",
            Mode::ExamPredictions => "exam_predictions",
            Mode::FastReview => "fast_review",
            Mode::Quiz => "quiz",
        }
    }

    /// Which display slot a generation in this mode occupies.
    pub fn kind(&self) -> ResultKind {
        match self {
            Mode::Quiz => ResultKind::Quiz,
            _ => ResultKind::Notes,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two display slots a session exposes: one for note-like output, one for
/// the quiz. Generating a new result of the same kind supersedes the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Notes,
    Quiz,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Notes => "notes",
            ResultKind::Quiz => "quiz",
        }
    }
}

/// The model's text for one (Document, Mode) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub mode: Mode,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One record in the session's append-only generation log.
///
/// Never mutated after creation; read back to restore a prior result into the
/// current display slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mode: Mode,
    pub created_at: DateTime<Utc>,
    pub text: String,
}
