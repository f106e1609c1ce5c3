// In-memory vector store with brute-force cosine search and JSON file
// persistence. Built once at startup and read-only while serving, so
// searches take &self and no locking is needed.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::document::Chunk;
use crate::llm_client::{Embedder, LlmError};

/// On-disk format version. Bump when `StoredDocument` changes shape.
const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] LlmError),

    #[error("Unsupported store format version {0}")]
    UnsupportedVersion(u32),
}

/// Chunk-level metadata persisted with each stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMetadata {
    pub source: String,
    pub content_type: String,
    pub chunk_index: usize,
}

/// A chunk with its embedding, the unit the store persists and searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    pub content: String,
    pub metadata: StoredMetadata,
    pub embedding: Vec<f32>,
}

/// A similarity-search hit.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub content: String,
    pub source: String,
    pub score: f32,
}

/// Search knobs. The defaults are the service's retrieval policy; main.rs
/// overrides them from RAG_TOP_K / RAG_SIMILARITY_THRESHOLD.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub top_k: usize,
    pub similarity_threshold: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.5,
        }
    }
}

#[derive(Serialize)]
struct StoreFileOut<'a> {
    version: u32,
    created_at: DateTime<Utc>,
    documents: &'a [StoredDocument],
}

#[derive(Deserialize)]
struct StoreFileIn {
    version: u32,
    documents: Vec<StoredDocument>,
}

/// The store. Owns its embedder, so `add` and `similarity_search` embed
/// internally and callers never touch raw vectors.
pub struct SimpleVectorStore {
    embedder: Arc<dyn Embedder>,
    documents: Vec<StoredDocument>,
}

impl std::fmt::Debug for SimpleVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleVectorStore")
            .field("documents", &self.documents.len())
            .finish_non_exhaustive()
    }
}

impl SimpleVectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            documents: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embeds each chunk and appends it to the store.
    /// Fails on the first embedding error; the caller decides whether a
    /// partial store is acceptable.
    pub async fn add(&mut self, chunks: Vec<Chunk>) -> Result<(), VectorStoreError> {
        for chunk in chunks {
            let embedding = self.embedder.embed(&chunk.content).await?;
            self.documents.push(StoredDocument {
                id: Uuid::new_v4(),
                content: chunk.content,
                metadata: StoredMetadata {
                    source: chunk.metadata.source,
                    content_type: chunk.metadata.content_type,
                    chunk_index: chunk.chunk_index,
                },
                embedding,
            });
        }
        Ok(())
    }

    /// Embeds the query and returns up to `top_k` documents scoring at or
    /// above the similarity threshold, ordered by descending score.
    /// An empty store short-circuits without calling the embedder.
    pub async fn similarity_search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<ScoredDocument>, VectorStoreError> {
        if self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .map(|doc| ScoredDocument {
                content: doc.content.clone(),
                source: doc.metadata.source.clone(),
                score: cosine_similarity(&query_embedding, &doc.embedding),
            })
            .filter(|hit| hit.score >= config.similarity_threshold)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(config.top_k);

        Ok(scored)
    }

    /// Serializes the store to a versioned JSON file.
    pub fn save(&self, path: &Path) -> Result<(), VectorStoreError> {
        let file = StoreFileOut {
            version: STORE_FORMAT_VERSION,
            created_at: Utc::now(),
            documents: &self.documents,
        };
        let bytes = serde_json::to_vec(&file)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a store previously written by `save`.
    pub fn load(embedder: Arc<dyn Embedder>, path: &Path) -> Result<Self, VectorStoreError> {
        let bytes = std::fs::read(path)?;
        let file: StoreFileIn = serde_json::from_slice(&bytes)?;

        if file.version != STORE_FORMAT_VERSION {
            return Err(VectorStoreError::UnsupportedVersion(file.version));
        }

        Ok(Self {
            embedder,
            documents: file.documents,
        })
    }
}

/// Cosine similarity between two vectors. Mismatched lengths (a store
/// persisted under a different embedding model) and zero-magnitude vectors
/// score 0.0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
