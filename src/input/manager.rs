//! Input manager for loading uploaded resumes

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{PdfExtractor, TextExtractor};
use log::info;
use std::path::Path;

/// Resume text together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedResume {
    pub file_name: String,
    pub text: String,
}

impl LoadedResume {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Load a resume the way the upload picker does: PDF files only
    pub async fn load_resume(&self, path: &Path) -> Result<LoadedResume> {
        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeAnalyzerError::UnsupportedFormat(
                    format!("Only PDF resumes are accepted: {}", path.display())
                ));
            }
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(LoadedResume { file_name, text })
    }
}
