#![allow(dead_code)]

//! Shared fixtures for the API tests: deterministic embedding/generation
//! fakes, a minimal single-page PDF builder, and request helpers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;

use vitae_api::config::Config;
use vitae_api::errors::AppError;
use vitae_api::rag::answer::Generator;
use vitae_api::rag::embed::Embedder;
use vitae_api::rag::index::SharedIndex;
use vitae_api::rag::pipeline;
use vitae_api::routes::build_router;
use vitae_api::state::AppState;

/// 53 characters; with chunk size 20 and overlap 5 it splits into 4 windows
/// and the first one carries "5 years".
pub const SCENARIO_TEXT: &str = "Experience: 5 years at Acme Corp as backend engineer.";

// ────────────────────────────────────────────────────────────────────────────
// Deterministic capability fakes
// ────────────────────────────────────────────────────────────────────────────

/// Maps text to a 26-dimension vector of first-letter word counts, so texts
/// sharing words land close together under cosine similarity.
pub fn bucket_vector(text: &str) -> Vec<f32> {
    let mut v = vec![0.0f32; 26];
    for word in text.split_whitespace() {
        if let Some(first) = word.chars().next() {
            let first = first.to_ascii_lowercase();
            if first.is_ascii_lowercase() {
                v[(first as u8 - b'a') as usize] += 1.0;
            }
        }
    }
    v
}

/// Embedder fake: deterministic bucket vectors, a failure switch, and an
/// attempt counter.
pub struct FakeEmbedder {
    fail: AtomicBool,
    batches: AtomicUsize,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            batches: AtomicUsize::new(0),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of embed calls attempted, including failed ones.
    pub fn batch_calls(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::EmbeddingService(
                "fake embedder offline".to_string(),
            ));
        }
        Ok(texts.iter().map(|t| bucket_vector(t)).collect())
    }
}

/// Generator fake: canned reply, a failure switch, and a transcript of every
/// (system, prompt) pair it saw.
pub struct FakeGenerator {
    reply: String,
    fail: AtomicBool,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeGenerator {
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: AtomicBool::new(false),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::GenerationService(
                "fake generator offline".to_string(),
            ));
        }
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        Ok(self.reply.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// App under test
// ────────────────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub router: Router,
    pub embedder: Arc<FakeEmbedder>,
    pub generator: Arc<FakeGenerator>,
    pub index: SharedIndex,
}

pub fn test_config() -> Config {
    Config {
        openai_api_key: "test-key".to_string(),
        chunk_size: 20,
        chunk_overlap: 5,
        retrieval_top_k: 2,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// Builds the full router over fakes. The returned handles share state with
/// the router, so tests can seed the index and inspect calls afterwards.
pub fn test_app(generator_reply: &str) -> TestApp {
    let embedder = Arc::new(FakeEmbedder::new());
    let generator = Arc::new(FakeGenerator::with_reply(generator_reply));
    let index = SharedIndex::new();

    let state = AppState {
        config: test_config(),
        embedder: embedder.clone(),
        generator: generator.clone(),
        index: index.clone(),
    };

    TestApp {
        router: build_router(state),
        embedder,
        generator,
        index,
    }
}

/// Indexes `text` directly (bypassing PDF extraction) with the test chunking
/// parameters and swaps it in, as a successful upload would.
pub async fn seed_resume(app: &TestApp, text: &str, filename: &str) {
    let config = test_config();
    let resume = pipeline::index_text(
        text,
        Some(filename.to_string()),
        config.chunk_size,
        config.chunk_overlap,
        app.embedder.as_ref(),
    )
    .await
    .unwrap();
    app.index.replace(resume).await;
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal PDF fixture
// ────────────────────────────────────────────────────────────────────────────

/// Builds a one-page PDF whose page shows `text` as a single Helvetica line.
/// Valid enough for real extraction: correct xref offsets, stream length,
/// and a standard font the extractor knows metrics for.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)");
    let content = format!("BT /F1 12 Tf 50 700 Td ({escaped}) Tj ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf: Vec<u8> = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}

// ────────────────────────────────────────────────────────────────────────────
// Request helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart upload request with a single file field.
pub fn upload_request(uri: &str, field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "vitae-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; \
             name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Multipart POST whose declared boundary never appears in the body, so
/// reading the first field fails.
pub fn malformed_multipart_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=vitae-test-boundary",
        )
        .body(Body::from("no boundary in sight"))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
