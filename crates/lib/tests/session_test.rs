//! Tests for the session state machine and the generation flow.

mod common;

use common::{FailingAiProvider, MockAiProvider};
use studygen::errors::{GenerationError, SessionError};
use studygen::prompts::default_instruction;
use studygen::{generate_study_aid, Document, Mode, ResultKind, SessionPhase, StudySession};

fn document(text: &str, pages: usize) -> Document {
    Document {
        text: text.to_string(),
        page_count: pages,
    }
}

#[test]
fn test_phase_transitions() {
    let mut session = StudySession::new();
    assert_eq!(session.phase(), SessionPhase::Empty);

    session.load_document(document("lesson", 1));
    assert_eq!(session.phase(), SessionPhase::DocumentLoaded);

    session.record(studygen::GenerationResult {
        mode: Mode::StructuredNotes,
        text: "notes".to_string(),
        created_at: chrono::Utc::now(),
    });
    assert_eq!(session.phase(), SessionPhase::ResultReady);

    // A new upload discards the displayed result but keeps history.
    session.load_document(document("next lesson", 3));
    assert_eq!(session.phase(), SessionPhase::DocumentLoaded);
    assert!(session.notes.is_none());
    assert_eq!(session.history.len(), 1);

    session.clear();
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert!(session.history.is_empty());
}

#[tokio::test]
async fn test_fast_review_generation_scenario() {
    // A 2-page document whose extracted text is a single known sentence.
    let sentence = "Cell division occurs in two phases.";
    let mut session = StudySession::new();
    session.load_document(document(sentence, 2));

    let provider = MockAiProvider::new();
    provider.add_response(sentence, "- Mitosis\n- Meiosis");

    let instruction = default_instruction(Mode::FastReview);
    let result = generate_study_aid(
        &provider,
        Mode::FastReview,
        instruction,
        &session.document.as_ref().unwrap().text,
        30_000,
    )
    .await
    .unwrap();

    // The provider saw both the instruction and the literal sentence.
    let calls = provider.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains(instruction));
    assert!(calls[0].contains(sentence));

    session.record(result);
    let stored = session.current(ResultKind::Notes).unwrap();
    assert_eq!(stored.text, "- Mitosis\n- Meiosis");
    assert_eq!(stored.mode, Mode::FastReview);
    assert_eq!(session.history.len(), 1);
}

#[tokio::test]
async fn test_failed_generation_leaves_prior_result_and_history() {
    let mut session = StudySession::new();
    session.load_document(document("lesson text", 1));

    session.record(studygen::GenerationResult {
        mode: Mode::StructuredNotes,
        text: "the good notes".to_string(),
        created_at: chrono::Utc::now(),
    });
    assert_eq!(session.history.len(), 1);

    let provider =
        FailingAiProvider::new(|| GenerationError::QuotaExhausted("out of quota".to_string()));
    let attempt = generate_study_aid(
        &provider,
        Mode::StructuredNotes,
        default_instruction(Mode::StructuredNotes),
        "lesson text",
        30_000,
    )
    .await;

    assert!(matches!(attempt, Err(GenerationError::QuotaExhausted(_))));
    // Nothing was recorded: the prior result stays displayed, history untouched.
    assert_eq!(
        session.current(ResultKind::Notes).unwrap().text,
        "the good notes"
    );
    assert_eq!(session.history.len(), 1);
}

#[test]
fn test_new_generation_supersedes_slot_but_not_history() {
    let mut session = StudySession::new();
    session.load_document(document("lesson", 1));

    for text in ["first notes", "second notes"] {
        session.record(studygen::GenerationResult {
            mode: Mode::Flashcards,
            text: text.to_string(),
            created_at: chrono::Utc::now(),
        });
    }
    assert_eq!(session.current(ResultKind::Notes).unwrap().text, "second notes");
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.history[0].text, "first notes");
}

#[test]
fn test_notes_and_quiz_slots_are_independent() {
    let mut session = StudySession::new();
    session.load_document(document("lesson", 1));

    session.record(studygen::GenerationResult {
        mode: Mode::StructuredNotes,
        text: "notes".to_string(),
        created_at: chrono::Utc::now(),
    });
    session.record(studygen::GenerationResult {
        mode: Mode::Quiz,
        text: "quiz".to_string(),
        created_at: chrono::Utc::now(),
    });

    assert_eq!(session.current(ResultKind::Notes).unwrap().text, "notes");
    assert_eq!(session.current(ResultKind::Quiz).unwrap().text, "quiz");
}

#[test]
fn test_restore_copies_history_entry_into_its_slot() {
    let mut session = StudySession::new();
    session.load_document(document("lesson", 1));

    session.record(studygen::GenerationResult {
        mode: Mode::Quiz,
        text: "old quiz".to_string(),
        created_at: chrono::Utc::now(),
    });
    session.record(studygen::GenerationResult {
        mode: Mode::Quiz,
        text: "new quiz".to_string(),
        created_at: chrono::Utc::now(),
    });

    let restored = session.restore(0).unwrap();
    assert_eq!(restored.text, "old quiz");
    assert_eq!(session.current(ResultKind::Quiz).unwrap().text, "old quiz");
    // Restoring does not append to history.
    assert_eq!(session.history.len(), 2);
}

#[test]
fn test_restore_out_of_range_is_an_error() {
    let mut session = StudySession::new();
    let result = session.restore(3);
    assert!(matches!(result, Err(SessionError::HistoryIndex(3))));
}
