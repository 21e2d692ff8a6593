//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::llm::analyzer::UnclosedThinkPolicy;
use crate::llm::model_manager::{ModelManager, MODEL_COUNT};
use crate::llm::prompts::PromptStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    pub models: ModelConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Connection and sampling settings for the local Ollama server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub base_url: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub stop: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub default_model: String,
    pub available_models: Vec<AvailableModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableModel {
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub max_resume_chars: usize,
    pub truncation_marker: String,
    pub prompt_style: PromptStyle,
    pub unclosed_think: UnclosedThinkPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_reasoning: bool,
    pub report_file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Text,
    Markdown,
    Json,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                base_url: "http://localhost:11434".to_string(),
                temperature: 0.7,
                timeout_secs: 60,
                stop: vec![
                    "</s>".to_string(),
                    "Human:".to_string(),
                    "Assistant:".to_string(),
                ],
            },
            models: ModelConfig {
                default_model: "deepseek-coder".to_string(),
                available_models: vec![
                    AvailableModel {
                        id: "deepseek-coder".to_string(),
                        label: "Deepseek Coder (Recommended)".to_string(),
                        description: "Fast general model, plain answers".to_string(),
                    },
                    AvailableModel {
                        id: "deepseek-r1:1.5b".to_string(),
                        label: "Deepseek R1 1.5B".to_string(),
                        description: "Small reasoning model, emits <think> segments".to_string(),
                    },
                ],
            },
            analysis: AnalysisConfig {
                max_resume_chars: 2000,
                truncation_marker: "...".to_string(),
                prompt_style: PromptStyle::Plain,
                unclosed_think: UnclosedThinkPolicy::WholeResponse,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_reasoning: false,
                report_file_name: "resume_analysis.txt".to_string(),
            },
        }
    }
}

impl Config {
    /// Load from an explicit path, writing defaults there if nothing exists yet
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let models = &self.models.available_models;
        if models.len() != MODEL_COUNT {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "models.available_models must list exactly {} models, found {}",
                MODEL_COUNT,
                models.len()
            )));
        }
        if models[0].id.eq_ignore_ascii_case(&models[1].id) {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "models.available_models lists '{}' twice",
                models[0].id
            )));
        }
        ModelManager::from_config(self).default_model().map_err(|_| {
            ResumeAnalyzerError::Configuration(format!(
                "default model '{}' is not in models.available_models",
                self.models.default_model
            ))
        })?;
        if self.engine.timeout_secs == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "engine.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.engine.temperature) {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "engine.temperature {} is outside 0.0..=2.0",
                self.engine.temperature
            )));
        }
        if self.analysis.max_resume_chars == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "analysis.max_resume_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_engine_contract() {
        let config = Config::default();
        assert_eq!(config.engine.temperature, 0.7);
        assert_eq!(config.engine.timeout_secs, 60);
        assert_eq!(config.analysis.max_resume_chars, 2000);
        assert_eq!(config.output.report_file_name, "resume_analysis.txt");
        assert_eq!(config.models.available_models.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_model_list_outside_closed_set() {
        let mut config = Config::default();
        config.models.available_models.push(AvailableModel {
            id: "llama3".to_string(),
            label: "Llama 3".to_string(),
            description: "extra".to_string(),
        });
        assert!(matches!(config.validate(), Err(ResumeAnalyzerError::Configuration(_))));

        config.models.available_models.truncate(1);
        assert!(matches!(config.validate(), Err(ResumeAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_rejects_duplicate_models() {
        let mut config = Config::default();
        config.models.available_models[1] = config.models.available_models[0].clone();
        assert!(matches!(config.validate(), Err(ResumeAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_load_writes_defaults_then_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(created.models.default_model, reloaded.models.default_model);
        assert_eq!(reloaded.analysis.unclosed_think, UnclosedThinkPolicy::WholeResponse);
        assert_eq!(reloaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_rejects_unknown_default_model() {
        let mut config = Config::default();
        config.models.default_model = "mistral".to_string();
        assert!(matches!(config.validate(), Err(ResumeAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_parses_policy_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.analysis.unclosed_think = UnclosedThinkPolicy::Error;
        config.analysis.prompt_style = PromptStyle::Reasoning;
        config.save_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("unclosed_think = \"error\""));
        assert!(text.contains("prompt_style = \"reasoning\""));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis.unclosed_think, UnclosedThinkPolicy::Error);
        assert_eq!(loaded.analysis.prompt_style, PromptStyle::Reasoning);
    }
}
