//! Generation handler: build the prompt for a mode, call the provider, store
//! the result.

use super::{
    lock_sessions_read, lock_sessions_write, parse_session_id, wrap_response, ApiResponse,
    AppError, AppState, DebugParams,
};
use crate::types::ResultView;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use studygen::{errors::SessionError, generate_study_aid, Mode};
use tracing::info;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub mode: Mode,
}

/// Handler for `POST /sessions/{id}/generate`.
///
/// The session lock is released for the duration of the provider round trip;
/// only the document text and instruction are carried across it. On any
/// provider failure nothing is recorded: the prior displayed result stays and
/// history is not appended.
pub async fn generate_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<ResultView>>, AppError> {
    let session_id = parse_session_id(&id)?;
    let mode = payload.mode;

    let provider = app_state
        .ai_provider
        .clone()
        .ok_or(AppError::GenerationUnavailable)?;

    let document_text = {
        let sessions = lock_sessions_read(&app_state)?;
        let session = sessions
            .get(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        let document = session
            .document
            .as_ref()
            .ok_or(SessionError::NoDocument)?;
        document.text.clone()
    };

    let instruction = app_state
        .instructions
        .get(&mode)
        .cloned()
        .unwrap_or_default();
    let limit = app_state.config.generation.truncation_limit;

    let result = generate_study_aid(provider.as_ref(), mode, &instruction, &document_text, limit)
        .await?;
    info!(%session_id, %mode, chars = result.text.chars().count(), "generation succeeded");

    let view = ResultView::from(&result);
    let history_len = {
        let mut sessions = lock_sessions_write(&app_state)?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        session.record(result);
        session.history.len()
    };

    let debug_info = json!({
        "model": app_state.active_model,
        "prompt_chars": instruction.chars().count() + document_text.chars().count().min(limit),
        "history_len": history_len,
    });
    Ok(wrap_response(view, debug_params, Some(debug_info)))
}
