//! Resume analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod session;

pub use error::{Result, ResumeAnalyzerError};
pub use config::Config;
