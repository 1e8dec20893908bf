use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitae_api::config::Config;
use vitae_api::openai_client::{self, OpenAiClient};
use vitae_api::rag::index::SharedIndex;
use vitae_api::routes::build_router;
use vitae_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // One OpenAI client backs both the embedding and generation capabilities
    let client = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!(
        "OpenAI client initialized (embeddings: {}, chat: {})",
        openai_client::EMBEDDING_MODEL,
        openai_client::CHAT_MODEL
    );

    // Build app state; the index stays empty until the first upload
    let state = AppState {
        config: config.clone(),
        embedder: client.clone(),
        generator: client,
        index: SharedIndex::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
