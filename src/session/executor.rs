//! Sequential execution of analysis tasks

use crate::llm::inference::InferenceEngine;
use crate::llm::{AnalysisResult, Aspect, ResumeAnalyzer};

/// One unit of work: analyse `text` for `aspect` with `model`
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTask {
    pub aspect: Aspect,
    pub model: String,
    pub text: String,
}

/// Runs tasks one after another, in the order given; never two at once
pub struct SequentialExecutor<E> {
    analyzer: ResumeAnalyzer<E>,
}

impl<E: InferenceEngine> SequentialExecutor<E> {
    pub fn new(analyzer: ResumeAnalyzer<E>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &ResumeAnalyzer<E> {
        &self.analyzer
    }

    pub async fn run(&self, task: &AnalysisTask) -> AnalysisResult {
        self.analyzer.analyze(&task.text, task.aspect, &task.model).await
    }

    /// `on_start` fires before each task, e.g. to update a spinner.
    /// A failed task yields its placeholder and the batch carries on.
    pub async fn run_all<F>(&self, tasks: &[AnalysisTask], mut on_start: F) -> Vec<(Aspect, AnalysisResult)>
    where
        F: FnMut(&AnalysisTask, usize, usize),
    {
        let mut results = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.iter().enumerate() {
            on_start(task, index, tasks.len());
            results.push((task.aspect, self.run(task).await));
        }
        results
    }
}
