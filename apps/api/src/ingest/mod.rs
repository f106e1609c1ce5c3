// Ingestion bootstrap: builds or loads the vector store once at startup.
// Per-file failures are logged and skipped; nothing in here may take the
// process down. The worst outcome is serving with an empty store.

pub mod splitter;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::document::Chunk;
use crate::extract;
use crate::llm_client::Embedder;
use crate::vector_store::{SimpleVectorStore, VectorStoreError};

use self::splitter::{SplitterConfig, TextSplitter};

/// Chunk cap per input file, keeping embedding spend bounded.
pub const MAX_CHUNKS_PER_FILE: usize = 5;
/// Overall chunk cap across all files.
pub const TOTAL_CHUNKS_LIMIT: usize = 20;
/// Store files at or below this size are treated as absent and rebuilt.
pub const MIN_STORE_BYTES: u64 = 5000;

/// Builds the vector store the service serves from: load the persisted file
/// when it is present and plausibly complete, otherwise rebuild from the
/// input folder and persist the result.
pub async fn bootstrap_vector_store(
    config: &Config,
    embedder: Arc<dyn Embedder>,
) -> SimpleVectorStore {
    let store_path = &config.vector_store_path;

    if let Ok(meta) = std::fs::metadata(store_path) {
        if meta.is_file() && meta.len() > MIN_STORE_BYTES {
            match SimpleVectorStore::load(embedder.clone(), store_path) {
                Ok(store) => {
                    info!(
                        "Successfully loaded existing vector store with {} bytes, {} documents",
                        meta.len(),
                        store.len()
                    );
                    return store;
                }
                Err(e) => {
                    warn!("Failed to load vector store, will recreate: {e}");
                }
            }
        }
    }

    let chunks = collect_chunks(&config.input_dir).await;

    if chunks.is_empty() {
        warn!("No documents were processed successfully");
        return SimpleVectorStore::new(embedder);
    }

    let summary = source_summary(&chunks);
    let mut store = SimpleVectorStore::new(embedder.clone());

    info!("Adding {} documents to vector store...", chunks.len());

    if let Err(e) = store.add(chunks).await {
        error!("Error adding documents to vector store: {e}");
        return SimpleVectorStore::new(embedder);
    }

    if let Err(e) = persist(&store, store_path) {
        error!("Error saving vector store: {e}");
        return SimpleVectorStore::new(embedder);
    }

    info!("Vector store saved successfully with {} documents", store.len());
    info!("Document Sources Summary:");
    for (source, count) in &summary {
        info!("Source: {source} - {count} chunks");
    }

    store
}

fn persist(store: &SimpleVectorStore, path: &Path) -> Result<(), VectorStoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    store.save(path)
}

/// Walks the input folder (sorted, for deterministic runs) and produces
/// capped chunks: at most `MAX_CHUNKS_PER_FILE` per file and never more than
/// `TOTAL_CHUNKS_LIMIT` overall.
async fn collect_chunks(input_dir: &Path) -> Vec<Chunk> {
    let entries = match std::fs::read_dir(input_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Input folder does not exist or is empty: {}: {e}",
                input_dir.display()
            );
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    info!("Starting document processing for {} files", paths.len());

    let splitter = TextSplitter::new(SplitterConfig::default());
    let mut chunks: Vec<Chunk> = Vec::new();

    for path in paths {
        if chunks.len() >= TOTAL_CHUNKS_LIMIT {
            info!("Reached total chunks limit of {TOTAL_CHUNKS_LIMIT}");
            break;
        }

        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        info!("Processing file: {} (Size: {} bytes)", path.display(), size);

        let document = match extract::extract_file(&path).await {
            Ok(document) => document,
            Err(e) => {
                error!("Error processing file {}: {e}", path.display());
                continue;
            }
        };

        let split = splitter.split(&document);
        let budget = MAX_CHUNKS_PER_FILE.min(TOTAL_CHUNKS_LIMIT - chunks.len());
        let taken = split.len().min(budget);

        info!(
            "Split into {} chunks from {}, keeping {}",
            split.len(),
            path.display(),
            taken
        );

        chunks.extend(split.into_iter().take(budget));
    }

    info!("Total documents processed: {} chunks from all files", chunks.len());

    chunks
}

fn source_summary(chunks: &[Chunk]) -> BTreeMap<String, usize> {
    let mut summary = BTreeMap::new();
    for chunk in chunks {
        *summary.entry(chunk.metadata.source.clone()).or_insert(0) += 1;
    }
    summary
}
