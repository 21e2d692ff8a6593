//! Per-session state: chosen model, uploaded resume and results so far

use crate::config::AvailableModel;
use crate::input::LoadedResume;
use crate::llm::{AnalysisResult, Aspect};
use std::collections::BTreeMap;

/// Owned by one interactive session and dropped with it
#[derive(Debug, Clone)]
pub struct SessionContext {
    model: AvailableModel,
    resume: Option<LoadedResume>,
    results: BTreeMap<Aspect, AnalysisResult>,
}

impl SessionContext {
    pub fn new(model: AvailableModel) -> Self {
        Self {
            model,
            resume: None,
            results: BTreeMap::new(),
        }
    }

    pub fn model(&self) -> &AvailableModel {
        &self.model
    }

    /// Applies to every analysis run after this call; earlier results stay
    pub fn select_model(&mut self, model: AvailableModel) {
        self.model = model;
    }

    pub fn resume(&self) -> Option<&LoadedResume> {
        self.resume.as_ref()
    }

    /// A new upload discards the previous text and everything derived from it
    pub fn set_resume(&mut self, resume: LoadedResume) {
        self.resume = Some(resume);
        self.results.clear();
    }

    pub fn results(&self) -> &BTreeMap<Aspect, AnalysisResult> {
        &self.results
    }

    pub fn result(&self, aspect: Aspect) -> Option<&AnalysisResult> {
        self.results.get(&aspect)
    }

    pub fn record(&mut self, aspect: Aspect, result: AnalysisResult) {
        self.results.insert(aspect, result);
    }

    /// Aspects without a result, in fixed enumeration order
    pub fn missing_aspects(&self) -> Vec<Aspect> {
        Aspect::ALL
            .into_iter()
            .filter(|aspect| !self.results.contains_key(aspect))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_aspects().is_empty()
    }

    /// Back to a fresh session, keeping the model choice
    pub fn reset(&mut self) {
        self.resume = None;
        self.results.clear();
    }
}
