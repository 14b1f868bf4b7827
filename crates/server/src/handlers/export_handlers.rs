//! Export handler: encode a displayed result as txt, docx, or pdf, on
//! demand. Nothing is ever cached to disk.

use super::{lock_sessions_read, parse_session_id, AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::str::FromStr;
use studygen::ResultKind;
use studygen_export::{encode_docx, encode_pdf, encode_txt, ExportFormat};
use tracing::info;

#[derive(Deserialize, Default)]
pub struct ExportParams {
    /// Which display slot to export; defaults to the notes slot.
    pub kind: Option<String>,
}

const EXPORT_TITLE: &str = "Study Notes";
const EXPORT_FILE_STEM: &str = "study_notes";

/// Handler for `GET /sessions/{id}/export/{format}?kind=notes|quiz`.
pub async fn export_handler(
    State(app_state): State<AppState>,
    Path((id, format)): Path<(String, String)>,
    Query(params): Query<ExportParams>,
) -> Result<Response, AppError> {
    let session_id = parse_session_id(&id)?;
    let format = ExportFormat::from_str(&format).map_err(AppError::BadRequest)?;
    let kind = match params.kind.as_deref() {
        None | Some("notes") => ResultKind::Notes,
        Some("quiz") => ResultKind::Quiz,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "unknown result kind '{other}', expected 'notes' or 'quiz'"
            )));
        }
    };

    let text = {
        let sessions = lock_sessions_read(&app_state)?;
        let session = sessions
            .get(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        session
            .current(kind)
            .ok_or_else(|| {
                AppError::WrongPhase(format!(
                    "no {} result to export; generate one first",
                    kind.as_str()
                ))
            })?
            .text
            .clone()
    };

    let bytes = match format {
        ExportFormat::Txt => encode_txt(&text),
        ExportFormat::Docx => encode_docx(EXPORT_TITLE, &text)?,
        ExportFormat::Pdf => encode_pdf(EXPORT_TITLE, &text)?,
    };
    info!(%session_id, format = format.extension(), kind = kind.as_str(), bytes = bytes.len(), "export encoded");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        format.file_name(EXPORT_FILE_STEM)
    );
    Ok((
        [
            (CONTENT_TYPE, format.mime_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
