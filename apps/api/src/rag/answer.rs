//! Answer composition.
//!
//! Builds the grounded prompt from retrieved chunks and hands it to the
//! generation capability. Service failures surface as
//! [`AppError::GenerationService`] with no retries; a failed generation
//! never touches the index, so the next question starts clean.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::rag::index::RetrievedChunk;
use crate::rag::prompts::{BASELINE_PROMPT_TEMPLATE, QA_PROMPT_TEMPLATE, QA_SYSTEM_PROMPT};

/// Turns a prompt into generated text.
///
/// The second seam next to [`crate::rag::embed::Embedder`]; `AppState`
/// carries it as `Arc<dyn Generator>` so tests can substitute a
/// deterministic fake.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AppError>;
}

/// Composes a grounded answer: the retrieved chunks go into the prompt
/// verbatim, joined by blank lines, followed by the question.
pub async fn compose_answer(
    question: &str,
    context: &[RetrievedChunk],
    generator: &dyn Generator,
) -> Result<String, AppError> {
    let context_block = context
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = QA_PROMPT_TEMPLATE
        .replace("{context}", &context_block)
        .replace("{question}", question);

    generator.generate(QA_SYSTEM_PROMPT, &prompt).await
}

/// Composes the ungrounded comparison answer. The model sees the question
/// but none of the resume.
pub async fn baseline_answer(
    question: &str,
    generator: &dyn Generator,
) -> Result<String, AppError> {
    let prompt = BASELINE_PROMPT_TEMPLATE.replace("{question}", question);
    generator.generate(QA_SYSTEM_PROMPT, &prompt).await
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
