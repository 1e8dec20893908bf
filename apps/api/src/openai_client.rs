//! OpenAI client: the single point of entry for all OpenAI API calls.
//!
//! No other module may call the OpenAI API directly. The rest of the app
//! reaches this client through the [`Embedder`] and [`Generator`]
//! capabilities it implements.
//!
//! Calls are single attempts: a failure is surfaced to the caller as-is,
//! never retried here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;
use crate::rag::answer::Generator;
use crate::rag::embed::Embedder;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
/// Embedding model for chunks and questions. Hardcoded: stored vectors and
/// query vectors must come from the same model.
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Dimension of `EMBEDDING_MODEL` output vectors, requested explicitly on
/// every embeddings call.
pub const EMBEDDING_DIMENSIONS: usize = 1536;
/// Chat model for answer generation.
pub const CHAT_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single OpenAI client, shared by embedding and generation.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    /// Points the client at a different API base. Tests use this to hit a
    /// local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Calls the embeddings endpoint for a batch of inputs. Returns one
    /// vector per input, in input order.
    pub async fn embeddings(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, OpenAiError> {
        let request_body = EmbeddingsRequest {
            model: EMBEDDING_MODEL,
            input: inputs,
            dimensions: EMBEDDING_DIMENSIONS,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: EmbeddingsResponse = response.json().await?;
        if parsed.data.len() != inputs.len() {
            return Err(OpenAiError::Malformed(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                parsed.data.len()
            )));
        }

        // The API is allowed to return items out of order; `index` says
        // which input each vector belongs to.
        let mut data = parsed.data;
        data.sort_by_key(|item| item.index);

        // Cosine scoring needs every vector in the same space.
        if let Some(first) = data.first() {
            let dim = first.embedding.len();
            if data.iter().any(|item| item.embedding.len() != dim) {
                return Err(OpenAiError::Malformed(
                    "embedding vectors differ in length".to_string(),
                ));
            }
        }

        debug!(
            inputs = inputs.len(),
            model = EMBEDDING_MODEL,
            "embedded batch"
        );

        Ok(data.into_iter().map(|item| item.embedding).collect())
    }

    /// Calls the chat completions endpoint with a system and user message,
    /// returning the assistant's text.
    pub async fn chat(&self, system: &str, prompt: &str) -> Result<String, OpenAiError> {
        let request_body = ChatRequest {
            model: CHAT_MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: ChatResponse = response.json().await?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion succeeded"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| OpenAiError::Malformed("completion had no content".to_string()))
    }

    /// Turns a non-success response into an `Api` error, preferring the
    /// message from the error envelope but falling back to the raw body.
    async fn error_from_response(response: reqwest::Response) -> OpenAiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        OpenAiError::Api { status, message }
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        self.embeddings(texts)
            .await
            .map_err(|e| AppError::EmbeddingService(e.to_string()))
    }
}

#[async_trait]
impl Generator for OpenAiClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        self.chat(system, prompt)
            .await
            .map_err(|e| AppError::GenerationService(e.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
