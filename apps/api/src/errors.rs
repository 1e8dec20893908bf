#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("No resume indexed")]
    EmptyIndex,

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::InvalidConfig(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONFIG", msg.clone())
            }
            AppError::EmbeddingService(msg) => {
                tracing::error!("Embedding service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_SERVICE_ERROR",
                    "The embedding service request failed".to_string(),
                )
            }
            AppError::EmptyIndex => (
                StatusCode::CONFLICT,
                "EMPTY_INDEX",
                "No resume has been uploaded yet".to_string(),
            ),
            AppError::GenerationService(msg) => {
                tracing::error!("Generation service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_SERVICE_ERROR",
                    "The answer generation request failed".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
