// Question-answer advisor: turns a user question into a retrieval-augmented
// prompt by searching the vector store and rendering the QA template.

use std::sync::Arc;

use tracing::debug;

use crate::llm_client::prompts::QA_PROMPT_TEMPLATE;
use crate::vector_store::{ScoredDocument, SearchConfig, SimpleVectorStore, VectorStoreError};

pub struct QuestionAnswerAdvisor {
    store: Arc<SimpleVectorStore>,
    config: SearchConfig,
}

impl QuestionAnswerAdvisor {
    pub fn new(store: Arc<SimpleVectorStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// Retrieves context for the question and renders the augmented user
    /// prompt. With no hits the context block stays empty and the RAG system
    /// prompt steers the model to its refusal line.
    pub async fn augment(&self, question: &str) -> Result<String, VectorStoreError> {
        let hits = self.store.similarity_search(question, &self.config).await?;

        debug!(
            "Retrieved {} context documents (top_k={}, threshold={})",
            hits.len(),
            self.config.top_k,
            self.config.similarity_threshold
        );
        for hit in &hits {
            debug!("Context hit: {} (score {:.3})", hit.source, hit.score);
        }

        Ok(render_qa_prompt(question, &hits))
    }
}

fn render_qa_prompt(question: &str, hits: &[ScoredDocument]) -> String {
    let context = hits
        .iter()
        .map(|hit| hit.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    QA_PROMPT_TEMPLATE
        .replace("{context}", &context)
        .replace("{query}", question)
}
