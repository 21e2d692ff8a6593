//! LLM inference against a locally running Ollama server

use crate::config::EngineConfig;
use crate::error::{Result, ResumeAnalyzerError};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Anything that turns a prompt into a completion for a named model
pub trait InferenceEngine {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Sampling options sent with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub stop: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<LocalModel>,
}

#[derive(Debug, Deserialize)]
struct LocalModel {
    name: String,
}

/// Non-streaming client for `POST /api/generate`
pub struct OllamaEngine {
    client: Client,
    base_url: String,
    options: GenerationOptions,
}

impl OllamaEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            options: GenerationOptions {
                temperature: config.temperature,
                stop: config.stop.clone(),
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of the models the server has pulled, e.g. `deepseek-coder:latest`
    pub async fn list_local_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ResumeAnalyzerError::LlmInference(format!(
                "Ollama returned {} for {}",
                resp.status(),
                url
            )));
        }

        let tags: TagsResponse = resp.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

impl InferenceEngine for OllamaEngine {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: &self.options,
        };

        debug!("POST {} model={} prompt_chars={}", url, model, prompt.chars().count());
        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ResumeAnalyzerError::ModelNotFound(model.to_string()));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ResumeAnalyzerError::LlmInference(format!(
                "Ollama returned {}: {}",
                status,
                text.trim()
            )));
        }

        let parsed: GenerateResponse = resp.json().await?;
        if parsed.response.trim().is_empty() {
            return Err(ResumeAnalyzerError::EmptyResponse);
        }
        Ok(parsed.response)
    }
}

/// Whether a model identifier is among the names reported by `/api/tags`
pub fn is_model_installed(model_id: &str, local_models: &[String]) -> bool {
    local_models.iter().any(|name| {
        name == model_id || (!model_id.contains(':') && name == &format!("{}:latest", model_id))
    })
}
