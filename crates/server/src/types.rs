use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studygen::{GenerationResult, Mode, SessionPhase, StudySession};

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// One generation result as rendered in API payloads.
#[derive(Serialize, Deserialize)]
pub struct ResultView {
    pub mode: Mode,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&GenerationResult> for ResultView {
    fn from(result: &GenerationResult) -> Self {
        Self {
            mode: result.mode,
            text: result.text.clone(),
            created_at: result.created_at,
        }
    }
}

/// Document statistics exposed in session snapshots.
#[derive(Serialize, Deserialize)]
pub struct DocumentStats {
    pub page_count: usize,
    pub text_chars: usize,
}

/// The full state of one session as seen by the client.
#[derive(Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub phase: SessionPhase,
    pub document: Option<DocumentStats>,
    pub notes: Option<ResultView>,
    pub quiz: Option<ResultView>,
    pub history_len: usize,
}

impl SessionSnapshot {
    pub fn of(session_id: &uuid::Uuid, session: &StudySession) -> Self {
        Self {
            session_id: session_id.to_string(),
            phase: session.phase(),
            document: session.document.as_ref().map(|d| DocumentStats {
                page_count: d.page_count,
                text_chars: d.text.chars().count(),
            }),
            notes: session.notes.as_ref().map(ResultView::from),
            quiz: session.quiz.as_ref().map(ResultView::from),
            history_len: session.history.len(),
        }
    }
}
