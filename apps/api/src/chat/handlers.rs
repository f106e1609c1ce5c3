//! Axum route handlers for the Chat API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::RAG_CHAT_SYSTEM;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Defaults to empty if the field is missing, which the handlers reject
    /// with the same message as an explicitly empty one.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AskQuery {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/chat
///
/// Pure model chat with no retrieval involved.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let response = state
        .llm
        .chat(None, &request.message)
        .await
        .map_err(|e| AppError::Llm(format!("Error in /chat: {e}")))?;

    Ok(Json(ChatResponse { response }))
}

/// GET /api/ask?question=...
///
/// Same as /chat but takes the question as a query parameter, for quick
/// browser and curl use.
pub async fn handle_ask(
    State(state): State<AppState>,
    Query(params): Query<AskQuery>,
) -> Result<Json<ChatResponse>, AppError> {
    if params.question.trim().is_empty() {
        return Err(AppError::Validation("Question cannot be empty".to_string()));
    }

    let response = state
        .llm
        .chat(None, &params.question)
        .await
        .map_err(|e| AppError::Llm(format!("Error in /ask: {e}")))?;

    Ok(Json(ChatResponse { response }))
}

/// POST /api/rag/chat
///
/// Retrieval-augmented chat over the document store. The advisor builds the
/// augmented prompt; the system prompt pins the model to that context.
pub async fn handle_rag_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let augmented = state
        .advisor
        .augment(&request.message)
        .await
        .map_err(|e| AppError::Llm(format!("Error in /rag/chat: {e}")))?;

    let response = state
        .llm
        .chat(Some(RAG_CHAT_SYSTEM), &augmented)
        .await
        .map_err(|e| AppError::Llm(format!("Error in /rag/chat: {e}")))?;

    Ok(Json(ChatResponse { response }))
}
