//! LLM integration module

pub mod model_manager;
pub mod inference;
pub mod prompts;
pub mod analyzer;

pub use analyzer::{AnalysisResult, ResumeAnalyzer, UnclosedThinkPolicy};
pub use inference::{InferenceEngine, OllamaEngine};
pub use prompts::{Aspect, PromptCatalog, PromptStyle};
