//! Embedding capability.
//!
//! A narrow seam over the external embedding service so the pipeline and
//! retriever can run against deterministic fakes in tests. `AppState` holds
//! an `Arc<dyn Embedder>`, wired to the OpenAI client at startup.

use async_trait::async_trait;

use crate::errors::AppError;

/// Converts text into fixed-dimension vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds a batch of texts. The output has one vector per input, in the
    /// same order, all of the same dimension. Any service failure (network,
    /// rate limiting, auth, malformed response) surfaces as
    /// [`AppError::EmbeddingService`]; there are no retries at this layer.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AppError>;

    /// Embeds a single text. Default implementation delegates to
    /// [`Embedder::embed_batch`].
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        vectors.pop().ok_or_else(|| {
            AppError::EmbeddingService(
                "embedding service returned no vector for the query".to_string(),
            )
        })
    }
}
