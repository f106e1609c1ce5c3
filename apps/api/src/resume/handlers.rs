//! Axum route handlers for the Resume Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::extract;
use crate::llm_client::prompts::{ATS_CHECK_PROMPT, RESUME_ANALYZE_PROMPT};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// The model's report, passed through verbatim. The prompt asks for
    /// JSON but the service does not re-validate it.
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct AtsCheckResponse {
    #[serde(rename = "atsReport")]
    pub ats_report: String,
}

struct ResumeUpload {
    filename: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze  (multipart: file)
///
/// Extracts the uploaded resume's text and asks the model for a skills,
/// rating, and improvements report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let (file, _) = read_resume_form(multipart).await?;
    let file = file.ok_or_else(|| AppError::Validation("file is required".to_string()))?;

    let resume_text = extract::extract_bytes(&file.filename, file.data)
        .await
        .map_err(|e| AppError::Extraction(format!("Error in /analyze: {e}")))?;

    let prompt = RESUME_ANALYZE_PROMPT.replace("{resume_text}", &resume_text);

    let analysis = state
        .llm
        .chat(None, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Error in /analyze: {e}")))?;

    Ok(Json(AnalyzeResponse { analysis }))
}

/// POST /api/ats-check  (multipart: file, jd)
///
/// Compares the uploaded resume against a job description and returns the
/// model's ATS report.
pub async fn handle_ats_check(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AtsCheckResponse>, AppError> {
    let (file, jd) = read_resume_form(multipart).await?;
    let file = file.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    let jd = jd.ok_or_else(|| AppError::Validation("jd is required".to_string()))?;

    let resume_text = extract::extract_bytes(&file.filename, file.data)
        .await
        .map_err(|e| AppError::Extraction(format!("Error in /ats-check: {e}")))?;

    let prompt = ATS_CHECK_PROMPT
        .replace("{resume_text}", &resume_text)
        .replace("{jd}", &jd);

    let ats_report = state
        .llm
        .chat(None, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Error in /ats-check: {e}")))?;

    Ok(Json(AtsCheckResponse { ats_report }))
}

/// Collects the `file` and `jd` fields from a multipart form.
/// Unknown fields are ignored; missing ones come back as None so each
/// handler raises its own validation message.
async fn read_resume_form(
    mut multipart: Multipart,
) -> Result<(Option<ResumeUpload>, Option<String>), AppError> {
    let mut file = None;
    let mut jd = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?;
                file = Some(ResumeUpload { filename, data });
            }
            "jd" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?;
                jd = Some(text);
            }
            _ => {}
        }
    }

    Ok((file, jd))
}
