//! Question-time retrieval.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::rag::embed::Embedder;
use crate::rag::index::{RetrievedChunk, SharedIndex};

/// Embeds `question` and returns the `top_k` most similar chunks from the
/// current index.
///
/// The index is checked before the question is embedded, so an unindexed
/// session fails with [`AppError::EmptyIndex`] without spending an
/// embedding call. Embedding failures propagate unchanged.
pub async fn retrieve(
    question: &str,
    top_k: usize,
    embedder: &dyn Embedder,
    index: &SharedIndex,
) -> Result<Vec<RetrievedChunk>, AppError> {
    let resume = index.current().await.ok_or(AppError::EmptyIndex)?;

    let query_vector = embedder.embed_one(question).await?;

    if top_k > resume.index.len() {
        warn!(
            requested = top_k,
            available = resume.index.len(),
            "requested more chunks than the index holds; returning all of them"
        );
    }

    let hits = resume.index.query(&query_vector, top_k);
    debug!(hits = hits.len(), "retrieved context for question");
    Ok(hits)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
