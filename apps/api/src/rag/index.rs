//! In-memory vector index over embedded resume chunks.
//!
//! One resume is indexed at a time. A build assembles a complete
//! [`VectorIndex`] off to the side and swaps it into [`SharedIndex`] only
//! once finished, so readers never observe a half-built index and a failed
//! rebuild leaves the previous resume queryable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One indexed chunk: its text, its embedding, and where it sat in the
/// document.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub id: Uuid,
    pub seq: usize,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A chunk returned from a similarity query, scored against the query vector.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedChunk {
    pub id: Uuid,
    pub seq: usize,
    pub text: String,
    pub score: f32,
}

/// Immutable similarity index over a fixed set of entries.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn build(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns up to `k` entries ranked by cosine similarity to `vector`,
    /// highest first. Ties keep insertion order (the sort is stable). Asking
    /// for more entries than exist returns everything there is.
    pub fn query(&self, vector: &[f32], k: usize) -> Vec<RetrievedChunk> {
        let mut scored: Vec<RetrievedChunk> = self
            .entries
            .iter()
            .map(|entry| RetrievedChunk {
                id: entry.id,
                seq: entry.seq,
                text: entry.text.clone(),
                score: cosine_similarity(&entry.embedding, vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity between two vectors. Zero-magnitude vectors score 0.0
/// against everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

// ────────────────────────────────────────────────────────────────────────────
// Indexed resume + shared handle
// ────────────────────────────────────────────────────────────────────────────

/// A fully indexed resume: the vector index plus upload metadata.
#[derive(Debug)]
pub struct IndexedResume {
    pub index: VectorIndex,
    pub filename: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Shared handle to the currently indexed resume.
///
/// `None` until the first successful build. Writers replace the whole
/// `Arc<IndexedResume>`; readers clone the `Arc` and query outside the lock,
/// so in-flight questions keep the snapshot they started with even if a new
/// upload lands mid-question.
#[derive(Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<Option<Arc<IndexedResume>>>>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current resume, if one has been indexed.
    pub async fn current(&self) -> Option<Arc<IndexedResume>> {
        self.inner.read().await.clone()
    }

    /// Swaps in a freshly built resume, superseding any previous one.
    pub async fn replace(&self, resume: IndexedResume) {
        *self.inner.write().await = Some(Arc::new(resume));
    }

    /// Drops the current resume. Returns whether there was one.
    pub async fn clear(&self) -> bool {
        self.inner.write().await.take().is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
