use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.config.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/sessions", post(handlers::create_session_handler))
        .route("/sessions/{id}", get(handlers::get_session_handler))
        .route("/sessions/{id}", delete(handlers::delete_session_handler))
        .route(
            "/sessions/{id}/document",
            post(handlers::upload_document_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/sessions/{id}/generate", post(handlers::generate_handler))
        .route("/sessions/{id}/history", get(handlers::history_handler))
        .route("/sessions/{id}/restore", post(handlers::restore_handler))
        .route(
            "/sessions/{id}/export/{format}",
            get(handlers::export_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
