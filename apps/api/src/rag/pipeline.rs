//! Build phase: document bytes to a queryable index.
//!
//! Upload processing runs extract -> chunk -> embed -> assemble as one
//! all-or-nothing step. The assembled [`IndexedResume`] is returned to the
//! caller, which swaps it into the shared handle only on success; a failure
//! at any stage leaves whatever was indexed before fully queryable.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::rag::chunk::chunk_text;
use crate::rag::embed::Embedder;
use crate::rag::extract::extract_text;
use crate::rag::index::{IndexEntry, IndexedResume, VectorIndex};

/// Indexes already-extracted resume text: chunk, embed, assemble.
pub async fn index_text(
    text: &str,
    filename: Option<String>,
    chunk_size: usize,
    chunk_overlap: usize,
    embedder: &dyn Embedder,
) -> Result<IndexedResume, AppError> {
    let chunks = chunk_text(text, chunk_size, chunk_overlap)?;
    info!(chunks = chunks.len(), "chunked resume text");

    let embeddings = embedder.embed_batch(&chunks).await?;
    if embeddings.len() != chunks.len() {
        return Err(AppError::EmbeddingService(format!(
            "embedding service returned {} vectors for {} chunks",
            embeddings.len(),
            chunks.len()
        )));
    }

    let entries = chunks
        .into_iter()
        .zip(embeddings)
        .enumerate()
        .map(|(seq, (text, embedding))| IndexEntry {
            id: Uuid::new_v4(),
            seq,
            text,
            embedding,
        })
        .collect();

    Ok(IndexedResume {
        index: VectorIndex::build(entries),
        filename,
        uploaded_at: Utc::now(),
    })
}

/// Full build phase for an uploaded PDF: extract, then index.
pub async fn index_upload(
    bytes: &[u8],
    filename: Option<String>,
    chunk_size: usize,
    chunk_overlap: usize,
    embedder: &dyn Embedder,
) -> Result<IndexedResume, AppError> {
    let text = extract_text(bytes)?;
    info!(chars = text.chars().count(), "extracted resume text");
    index_text(&text, filename, chunk_size, chunk_overlap, embedder).await
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
