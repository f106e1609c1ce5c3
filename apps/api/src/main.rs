mod chat;
mod config;
mod document;
mod errors;
mod extract;
mod ingest;
mod llm_client;
mod resume;
mod retrieval;
mod routes;
mod state;
mod vector_store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::bootstrap_vector_store;
use crate::llm_client::{Embedder, LlmClient};
use crate::retrieval::QuestionAnswerAdvisor;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_store::SearchConfig;

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

    info!("Starting Parley API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.chat_model.clone(),
        config.embedding_model.clone(),
    );
    info!(
        "LLM client initialized (chat model: {}, embedding model: {})",
        config.chat_model, config.embedding_model
    );

    // Build or load the vector store, then wrap it in the retrieval advisor
    let embedder: Arc<dyn Embedder> = Arc::new(llm.clone());
    let store = Arc::new(bootstrap_vector_store(&config, embedder).await);
    if store.is_empty() {
        warn!("Vector store is empty; /api/rag/chat will answer with the fallback line");
    } else {
        info!("Vector store ready ({} documents)", store.len());
    }

    let advisor = Arc::new(QuestionAnswerAdvisor::new(
        store,
        SearchConfig {
            top_k: config.rag_top_k,
            similarity_threshold: config.rag_similarity_threshold,
        },
    ));

    // Build app state
    let state = AppState { llm, advisor };

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
