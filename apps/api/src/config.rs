use anyhow::{bail, Context, Result};

use crate::rag::chunk;

/// Application configuration loaded from environment variables.
/// Refuses to start if required variables are missing or chunking
/// parameters are inconsistent.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub retrieval_top_k: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            chunk_size: env_or("CHUNK_SIZE", 500)?,
            chunk_overlap: env_or("CHUNK_OVERLAP", 50)?,
            retrieval_top_k: env_or("RETRIEVAL_TOP_K", 4)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        chunk::validate_params(config.chunk_size, config.chunk_overlap)
            .context("CHUNK_SIZE / CHUNK_OVERLAP are inconsistent")?;
        if config.retrieval_top_k == 0 {
            bail!("RETRIEVAL_TOP_K must be at least 1");
        }

        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
