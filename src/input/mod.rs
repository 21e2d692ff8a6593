//! Input processing module
//! Handles file detection and PDF text extraction

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::{InputManager, LoadedResume};
pub use text_extractor::extract_pdf_text;
