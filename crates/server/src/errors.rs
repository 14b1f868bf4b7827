use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studygen::errors::{GenerationError, SessionError};
use studygen_export::ExportError;
use studygen_extract::ExtractError;
use tracing::error;
use uuid::Uuid;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the
/// server, allowing them to be converted into appropriate HTTP responses.
/// Every externally-caused failure is caught at the triggering action and
/// rendered as a user-visible message; none crash the process.
pub enum AppError {
    /// A failure from the AI provider round trip.
    Generation(GenerationError),
    /// The uploaded byte stream was not a well-formed PDF.
    Extract(ExtractError),
    /// An export encoder failed.
    Export(ExportError),
    /// A session state transition was rejected.
    Session(SessionError),
    /// No session exists for the given identifier.
    SessionNotFound(Uuid),
    /// The requested action does not fit the session's current phase.
    WrongPhase(String),
    /// Malformed input: unknown mode, bad index, bad format, non-PDF part.
    BadRequest(String),
    /// No AI provider is configured; the generation feature is disabled.
    GenerationUnavailable,
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Generation(err) => {
                error!("GenerationError: {:?}", err);
                match err {
                    GenerationError::QuotaExhausted(e) => (
                        StatusCode::TOO_MANY_REQUESTS,
                        format!("AI provider quota exhausted: {e}"),
                    ),
                    GenerationError::MissingApiKey => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Generation is unavailable: no API key is configured.".to_string(),
                    ),
                    other => (StatusCode::BAD_GATEWAY, other.to_string()),
                }
            }
            AppError::Extract(err) => {
                error!("ExtractError: {:?}", err);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Could not read the uploaded PDF: {err}"),
                )
            }
            AppError::Export(err) => {
                error!("ExportError: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Export failed: {err}"),
                )
            }
            AppError::Session(err) => match err {
                // Generating before an upload is a phase conflict, not bad input.
                SessionError::NoDocument => (StatusCode::CONFLICT, err.to_string()),
                SessionError::HistoryIndex(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            },
            AppError::SessionNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Unknown session '{id}'"))
            }
            AppError::WrongPhase(msg) => (StatusCode::CONFLICT, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::GenerationUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Generation is unavailable: no API key is configured.".to_string(),
            ),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
