//! Text extraction from uploaded PDF resumes

use crate::error::{Result, ResumeAnalyzerError};
use log::{debug, warn};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Extract the text of every page, in order, from PDF bytes.
///
/// Pages without a text layer (scanned images) simply contribute nothing.
/// Only bytes that do not parse as a PDF produce an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ResumeAnalyzerError::PdfExtraction(e.to_string()))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        warn!("PDF parsed but contained no extractable text");
    }
    debug!("Extracted {} characters from {} byte PDF", text.chars().count(), bytes.len());
    Ok(text)
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        extract_pdf_text(&bytes).map_err(|e| match e {
            ResumeAnalyzerError::PdfExtraction(cause) => ResumeAnalyzerError::PdfExtraction(
                format!("Failed to extract text from PDF '{}': {}", path.display(), cause),
            ),
            other => other,
        })
    }
}
