//! Document upload handler: multipart PDF in, extracted document stored.

use super::{
    lock_sessions_write, parse_session_id, wrap_response, ApiResponse, AppError, AppState,
    DebugParams,
};
use axum::extract::{Path, Query, State};
use axum::Json;
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use serde_json::json;
use studygen::SessionPhase;
use studygen_extract::extract_document;
use tracing::info;

#[derive(Serialize, Deserialize)]
pub struct UploadResponse {
    pub page_count: usize,
    pub text_chars: usize,
    pub phase: SessionPhase,
}

/// Handler for `POST /sessions/{id}/document`.
///
/// Accepts one multipart part whose declared content type is
/// `application/pdf`, extracts its text, and loads it into the session.
/// A failed extraction leaves the session's previous document in place.
pub async fn upload_document_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    debug_params: Query<DebugParams>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, AppError> {
    let session_id = parse_session_id(&id)?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart upload: {e}")))?
        .ok_or_else(|| AppError::BadRequest("upload contains no file part".to_string()))?;

    match field.content_type() {
        Some("application/pdf") => {}
        other => {
            return Err(AppError::BadRequest(format!(
                "expected a part with content type 'application/pdf', got {other:?}"
            )));
        }
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read uploaded file: {e}")))?;

    // Extraction is synchronous and CPU-bound; the session lock is only
    // taken once the document is ready.
    let document = extract_document(&data)?;
    let response = UploadResponse {
        page_count: document.page_count,
        text_chars: document.text.chars().count(),
        phase: SessionPhase::DocumentLoaded,
    };
    info!(
        %session_id,
        pages = document.page_count,
        bytes = data.len(),
        "document extracted"
    );

    let mut sessions = lock_sessions_write(&app_state)?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;
    session.load_document(document);

    let debug_info = json!({
        "upload_bytes": data.len(),
        "history_len": session.history.len(),
    });
    Ok(wrap_response(response, debug_params, Some(debug_info)))
}
