//! Shared helpers for integration tests

#![allow(dead_code)]

use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::llm::InferenceEngine;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub model: String,
    pub prompt: String,
}

enum Reply {
    Text(String),
    Fail(fn() -> ResumeAnalyzerError),
}

/// In-memory engine that replays scripted replies and records every prompt
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    delay: Option<Duration>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call so timings are non-zero
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Text(text.to_string()));
        self
    }

    pub fn fail(self, error: fn() -> ResumeAnalyzerError) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Fail(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl InferenceEngine for ScriptedEngine {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(Call {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(error)) => Err(error()),
            None => Ok("default answer".to_string()),
        }
    }
}
