//! Model selection over the fixed set of Ollama models

use crate::config::{AvailableModel, Config};
use crate::error::{Result, ResumeAnalyzerError};
use crate::llm::inference::{is_model_installed, OllamaEngine};
use log::warn;
use serde::Serialize;

/// Size of the closed set of selectable models
pub const MODEL_COUNT: usize = 2;

/// A selectable model and whether the local server has it pulled
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub id: String,
    pub label: String,
    pub description: String,
    pub is_default: bool,
    /// `None` when the server could not be asked
    pub installed: Option<bool>,
}

/// The closed set of models a session may choose from
#[derive(Debug, Clone)]
pub struct ModelManager {
    available_models: Vec<AvailableModel>,
    default_model: String,
}

impl ModelManager {
    pub fn from_config(config: &Config) -> Self {
        Self {
            available_models: config.models.available_models.clone(),
            default_model: config.models.default_model.clone(),
        }
    }

    pub fn list_available_models(&self) -> &[AvailableModel] {
        &self.available_models
    }

    pub fn default_model(&self) -> Result<&AvailableModel> {
        self.resolve(&self.default_model)
    }

    /// Accepts either the identifier or the display label
    pub fn resolve(&self, query: &str) -> Result<&AvailableModel> {
        let query = query.trim();
        self.available_models
            .iter()
            .find(|m| m.id.eq_ignore_ascii_case(query) || m.label.eq_ignore_ascii_case(query))
            .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(format!(
                "{} (choose one of: {})",
                query,
                self.available_models.iter().map(|m| m.id.as_str()).collect::<Vec<_>>().join(", ")
            )))
    }

    /// Annotate every model with its install status on the server
    pub async fn statuses(&self, engine: &OllamaEngine) -> Vec<ModelStatus> {
        let local = match engine.list_local_models().await {
            Ok(local) => Some(local),
            Err(e) => {
                warn!("Could not list models from {}: {}", engine.base_url(), e);
                None
            }
        };

        self.available_models
            .iter()
            .map(|m| ModelStatus {
                id: m.id.clone(),
                label: m.label.clone(),
                description: m.description.clone(),
                is_default: m.id == self.default_model,
                installed: local.as_ref().map(|names| is_model_installed(&m.id, names)),
            })
            .collect()
    }
}
