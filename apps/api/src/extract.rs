// Text extraction for ingestion files and uploaded resumes.
// PDF parsing is CPU-bound and must run inside tokio::task::spawn_blocking.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

use crate::document::{Document, DocumentMetadata};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

/// Extracts the text of a file on disk into a `Document`.
///
/// `.pdf` files go through the PDF parser; everything else is read as UTF-8
/// text. Unreadable or malformed files surface as errors for the caller to
/// log and skip.
pub async fn extract_file(path: &Path) -> Result<Document, ExtractError> {
    let source = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if extension == "pdf" {
        let path = path.to_path_buf();
        let content = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text(&path).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

        return Ok(Document {
            content,
            metadata: DocumentMetadata {
                source,
                content_type: "application/pdf".to_string(),
            },
        });
    }

    let content_type = match extension.as_str() {
        "md" | "markdown" => "text/markdown",
        _ => "text/plain",
    };
    let content = tokio::fs::read_to_string(path).await?;

    Ok(Document {
        content,
        metadata: DocumentMetadata {
            source,
            content_type: content_type.to_string(),
        },
    })
}

/// Extracts text from an uploaded payload.
///
/// PDFs are recognized by filename or by the `%PDF` magic bytes, so a PDF
/// uploaded under a generic name is still parsed. Anything else is decoded
/// as UTF-8 with lossy replacement, matching how resume uploads of unknown
/// provenance are treated.
pub async fn extract_bytes(filename: &str, data: Bytes) -> Result<String, ExtractError> {
    if is_pdf(filename, &data) {
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

        return Ok(text);
    }

    Ok(String::from_utf8_lossy(&data).into_owned())
}

fn is_pdf(filename: &str, data: &[u8]) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf") || data.starts_with(b"%PDF")
}
