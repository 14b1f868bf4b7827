//! Session lifecycle handlers: create, snapshot, history, restore, delete.

use super::{
    lock_sessions_read, lock_sessions_write, parse_session_id, wrap_response, ApiResponse,
    AppError, AppState, DebugParams,
};
use crate::types::{ResultView, SessionSnapshot};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use studygen::{Mode, StudySession};
use tracing::info;
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Handler for `POST /sessions`. Creates an empty session.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<CreateSessionResponse>>, AppError> {
    let session_id = Uuid::new_v4();
    lock_sessions_write(&app_state)?.insert(session_id, StudySession::new());
    info!(%session_id, "session created");

    let response = CreateSessionResponse {
        session_id: session_id.to_string(),
    };
    Ok(wrap_response(response, debug_params, None))
}

/// Handler for `GET /sessions/{id}`. Returns the session snapshot.
pub async fn get_session_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, AppError> {
    let session_id = parse_session_id(&id)?;
    let sessions = lock_sessions_read(&app_state)?;
    let session = sessions
        .get(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;

    let snapshot = SessionSnapshot::of(&session_id, session);
    Ok(wrap_response(snapshot, debug_params, None))
}

/// Handler for `DELETE /sessions/{id}`. Ends the session and discards all of
/// its state, history included.
pub async fn delete_session_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let session_id = parse_session_id(&id)?;
    let removed = lock_sessions_write(&app_state)?.remove(&session_id);
    if removed.is_none() {
        return Err(AppError::SessionNotFound(session_id));
    }
    info!(%session_id, "session ended");
    Ok(wrap_response("Session ended".to_string(), debug_params, None))
}

/// One history entry as listed by the API. The full text is withheld in
/// favor of a short preview; `restore` brings the full text back on display.
#[derive(Serialize, Deserialize)]
pub struct HistoryEntryView {
    pub index: usize,
    pub mode: Mode,
    pub created_at: DateTime<Utc>,
    pub preview: String,
}

/// Handler for `GET /sessions/{id}/history`.
pub async fn history_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<HistoryEntryView>>>, AppError> {
    let session_id = parse_session_id(&id)?;
    let sessions = lock_sessions_read(&app_state)?;
    let session = sessions
        .get(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;

    let entries = session
        .history
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryEntryView {
            index,
            mode: entry.mode,
            created_at: entry.created_at,
            preview: entry.text.chars().take(80).collect(),
        })
        .collect();
    Ok(wrap_response(entries, debug_params, None))
}

#[derive(Deserialize)]
pub struct RestoreRequest {
    pub index: usize,
}

/// Handler for `POST /sessions/{id}/restore`. Copies a history entry back
/// into its display slot.
pub async fn restore_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<RestoreRequest>,
) -> Result<Json<ApiResponse<ResultView>>, AppError> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = lock_sessions_write(&app_state)?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;

    let restored = session.restore(payload.index)?;
    info!(%session_id, index = payload.index, mode = %restored.mode, "history entry restored");

    let debug_info = json!({ "history_len": session.history.len() });
    Ok(wrap_response(
        ResultView::from(&restored),
        debug_params,
        Some(debug_info),
    ))
}
