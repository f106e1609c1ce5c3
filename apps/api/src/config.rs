use anyhow::{Context, Result};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub input_dir: PathBuf,
    pub vector_store_path: PathBuf,
    pub rag_top_k: usize,
    pub rag_similarity_threshold: f32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            chat_model: env_or("CHAT_MODEL", "gpt-4o-mini"),
            embedding_model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
            input_dir: PathBuf::from(env_or("INPUT_DIR", "data/input")),
            vector_store_path: PathBuf::from(env_or("VECTOR_STORE_PATH", "data/vectorstore.json")),
            rag_top_k: env_or("RAG_TOP_K", "5")
                .parse::<usize>()
                .context("RAG_TOP_K must be a non-negative integer")?,
            rag_similarity_threshold: env_or("RAG_SIMILARITY_THRESHOLD", "0.5")
                .parse::<f32>()
                .context("RAG_SIMILARITY_THRESHOLD must be a number")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
