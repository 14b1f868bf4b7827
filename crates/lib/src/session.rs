//! # Session State Machine
//!
//! One `StudySession` holds everything a user accumulates between opening the
//! app and leaving: the current document, the two display slots, and the
//! append-only generation history. The session is owned by a single logical
//! actor; every mutation happens in response to exactly one user action, so
//! no internal locking is needed here.

use crate::errors::{GenerationError, SessionError};
use crate::prompts::build_prompt;
use crate::providers::ai::AiProvider;
use crate::types::{Document, GenerationResult, HistoryEntry, Mode, ResultKind};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a session currently stands.
///
/// Computed from the typed fields rather than stored, so the phase can never
/// drift from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No document uploaded yet.
    Empty,
    /// Extraction succeeded; nothing generated for this document yet.
    DocumentLoaded,
    /// At least one generation result is on display.
    ResultReady,
}

/// All state owned by one user session.
///
/// Created at session start and discarded at session end; nothing here is
/// ever persisted to durable storage.
#[derive(Debug, Default, Clone)]
pub struct StudySession {
    pub document: Option<Document>,
    pub notes: Option<GenerationResult>,
    pub quiz: Option<GenerationResult>,
    pub history: Vec<HistoryEntry>,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.notes.is_some() || self.quiz.is_some() {
            SessionPhase::ResultReady
        } else if self.document.is_some() {
            SessionPhase::DocumentLoaded
        } else {
            SessionPhase::Empty
        }
    }

    /// Replaces the current document, clearing both display slots.
    ///
    /// History survives a new upload; only the displayed results belong to
    /// the replaced document.
    pub fn load_document(&mut self, document: Document) {
        debug!(
            pages = document.page_count,
            chars = document.text.chars().count(),
            "loading document into session"
        );
        self.document = Some(document);
        self.notes = None;
        self.quiz = None;
    }

    /// Stores a generation result in its display slot and appends it to the
    /// history. The superseded result (if any) stays in history.
    pub fn record(&mut self, result: GenerationResult) {
        self.history.push(HistoryEntry {
            mode: result.mode,
            created_at: result.created_at,
            text: result.text.clone(),
        });
        match result.mode.kind() {
            ResultKind::Notes => self.notes = Some(result),
            ResultKind::Quiz => self.quiz = Some(result),
        }
    }

    /// Copies history entry `index` back into its display slot.
    pub fn restore(&mut self, index: usize) -> Result<GenerationResult, SessionError> {
        let entry = self
            .history
            .get(index)
            .ok_or(SessionError::HistoryIndex(index))?;
        let result = GenerationResult {
            mode: entry.mode,
            text: entry.text.clone(),
            created_at: entry.created_at,
        };
        match result.mode.kind() {
            ResultKind::Notes => self.notes = Some(result.clone()),
            ResultKind::Quiz => self.quiz = Some(result.clone()),
        }
        Ok(result)
    }

    /// The result currently shown in the given display slot.
    pub fn current(&self, kind: ResultKind) -> Option<&GenerationResult> {
        match kind {
            ResultKind::Notes => self.notes.as_ref(),
            ResultKind::Quiz => self.quiz.as_ref(),
        }
    }

    /// Discards everything, returning the session to `Empty`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Builds the prompt for `mode` and runs it through the provider.
///
/// On success the returned result is timestamped and ready to [`StudySession::record`].
/// On failure nothing is recorded anywhere: the caller's prior result stays
/// displayed and history is untouched.
pub async fn generate_study_aid(
    provider: &dyn AiProvider,
    mode: Mode,
    instruction: &str,
    document_text: &str,
    truncation_limit: usize,
) -> Result<GenerationResult, GenerationError> {
    let prompt = build_prompt(instruction, document_text, truncation_limit);
    debug!(%mode, prompt_chars = prompt.chars().count(), "dispatching generation request");
    let text = provider.generate(&prompt).await?;
    Ok(GenerationResult {
        mode,
        text,
        created_at: Utc::now(),
    })
}
