//! Error handling for the resume analyzer application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Unterminated <think> segment in model response")]
    ThinkParse,

    #[error("LLM inference error: {0}")]
    LlmInference(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("No resume uploaded yet")]
    NoResume,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

/// Convert HTTP client errors, keeping timeouts distinguishable
impl From<reqwest::Error> for ResumeAnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResumeAnalyzerError::Timeout(err.to_string())
        } else {
            ResumeAnalyzerError::Network(err.to_string())
        }
    }
}
