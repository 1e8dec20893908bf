use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::rag::answer::{baseline_answer, compose_answer};
use crate::rag::index::RetrievedChunk;
use crate::rag::pipeline::index_upload;
use crate::rag::prompts::SUGGESTED_QUESTIONS;
use crate::rag::retrieve::retrieve;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub chunk_count: usize,
    pub message: String,
}

#[derive(Serialize)]
pub struct ResumeStatusResponse {
    pub ready: bool,
    pub chunk_count: Option<usize>,
    pub filename: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub include_baseline: bool,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<RetrievedChunk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_answer: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestedQuestionsResponse {
    pub questions: Vec<&'static str>,
}

/// POST /api/v1/resume
///
/// Accepts one PDF in a multipart `file` field, runs the build phase, and
/// swaps the fresh index in. On any failure the previously indexed resume
/// (if any) stays in place.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let resume = index_upload(
        &data,
        filename.clone(),
        state.config.chunk_size,
        state.config.chunk_overlap,
        state.embedder.as_ref(),
    )
    .await?;

    let chunk_count = resume.index.len();
    state.index.replace(resume).await;
    info!(?filename, chunk_count, "resume indexed");

    Ok(Json(UploadResponse {
        filename,
        chunk_count,
        message: "Resume processed successfully".to_string(),
    }))
}

/// Pulls the bytes of the `file` field out of the multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<(Option<String>, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read file field: {e}")))?;
            return Ok((filename, data));
        }
    }
    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/resume/questions
pub async fn handle_ask_question(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation(
            "question must not be empty".to_string(),
        ));
    }

    let sources = retrieve(
        question,
        state.config.retrieval_top_k,
        state.embedder.as_ref(),
        &state.index,
    )
    .await?;

    let answer = compose_answer(question, &sources, state.generator.as_ref()).await?;

    let baseline = if req.include_baseline {
        Some(baseline_answer(question, state.generator.as_ref()).await?)
    } else {
        None
    };

    Ok(Json(AskResponse {
        question: question.to_string(),
        answer,
        sources,
        baseline_answer: baseline,
    }))
}

/// GET /api/v1/resume
pub async fn handle_resume_status(State(state): State<AppState>) -> Json<ResumeStatusResponse> {
    match state.index.current().await {
        Some(resume) => Json(ResumeStatusResponse {
            ready: true,
            chunk_count: Some(resume.index.len()),
            filename: resume.filename.clone(),
            uploaded_at: Some(resume.uploaded_at),
        }),
        None => Json(ResumeStatusResponse {
            ready: false,
            chunk_count: None,
            filename: None,
            uploaded_at: None,
        }),
    }
}

/// DELETE /api/v1/resume
pub async fn handle_clear_resume(State(state): State<AppState>) -> StatusCode {
    let cleared = state.index.clear().await;
    info!(cleared, "resume index cleared");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/resume/questions/suggested
pub async fn handle_suggested_questions() -> Json<SuggestedQuestionsResponse> {
    Json(SuggestedQuestionsResponse {
        questions: SUGGESTED_QUESTIONS.to_vec(),
    })
}
