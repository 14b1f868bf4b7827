//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the
//! `studygen-server`, split into logical sub-modules (sessions, document
//! upload, generation, export).

pub mod document_handlers;
pub mod export_handlers;
pub mod general;
pub mod generation_handlers;
pub mod session_handlers;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use document_handlers::*;
pub use export_handlers::*;
pub use general::*;
pub use generation_handlers::*;
pub use session_handlers::*;

// Shared items used by multiple handler modules.
use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, Json};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};
use studygen::StudySession;
use uuid::Uuid;

/// A shared helper function to wrap a successful result in the standard
/// `ApiResponse` format, optionally including debug information if requested.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}

/// Parses a path segment as a session id.
pub(crate) fn parse_session_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(format!("invalid session id '{id}'")))
}

pub(crate) fn lock_sessions_read(
    app_state: &AppState,
) -> Result<RwLockReadGuard<'_, HashMap<Uuid, StudySession>>, AppError> {
    app_state
        .sessions
        .read()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session read lock")))
}

pub(crate) fn lock_sessions_write(
    app_state: &AppState,
) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, StudySession>>, AppError> {
    app_state
        .sessions
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session write lock")))
}
