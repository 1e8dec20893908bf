pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::rag::handlers;
use crate::state::AppState;

/// Uploads above this size are rejected before extraction runs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume lifecycle
        .route(
            "/api/v1/resume",
            post(handlers::handle_upload_resume)
                .get(handlers::handle_resume_status)
                .delete(handlers::handle_clear_resume),
        )
        // Question answering
        .route(
            "/api/v1/resume/questions",
            post(handlers::handle_ask_question),
        )
        .route(
            "/api/v1/resume/questions/suggested",
            get(handlers::handle_suggested_questions),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
