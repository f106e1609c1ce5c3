use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::retrieval::QuestionAnswerAdvisor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Retrieval advisor over the vector store built at startup.
    /// The store is read-only while serving, so no locking is involved.
    pub advisor: Arc<QuestionAnswerAdvisor>,
}
