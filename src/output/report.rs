//! Complete report: fills missing aspects, then aggregates results and timings

use crate::error::{Result, ResumeAnalyzerError};
use crate::llm::analyzer::{format_secs, round_2dp};
use crate::llm::inference::InferenceEngine;
use crate::llm::{AnalysisResult, Aspect};
use crate::session::context::SessionContext;
use crate::session::executor::{AnalysisTask, SequentialExecutor};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REPORT_TITLE: &str = "Resume Analysis Report";
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/plain";

/// One aspect as it appears in the combined view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub aspect: Aspect,
    pub icon: String,
    pub title: String,
    pub text: String,
    pub elapsed_secs: f64,
    pub reasoning: Option<String>,
    pub failed: bool,
}

/// All five aspects in fixed order plus their total time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteReport {
    pub sections: Vec<ReportSection>,
    pub total_secs: f64,
    pub model: String,
    pub resume_file: String,
    pub generated_at: DateTime<Utc>,
}

/// A file offered to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Download {
    pub file_name: String,
    pub content_type: String,
    pub body: String,
}

impl CompleteReport {
    /// Fails unless every aspect has a result
    pub fn from_results(
        results: &BTreeMap<Aspect, AnalysisResult>,
        model: &str,
        resume_file: &str,
    ) -> Result<Self> {
        let mut sections = Vec::with_capacity(Aspect::ALL.len());
        for aspect in Aspect::ALL {
            let result = results.get(&aspect).ok_or_else(|| {
                ResumeAnalyzerError::InvalidInput(format!("No result for aspect '{}'", aspect))
            })?;
            let info = aspect.info();
            sections.push(ReportSection {
                aspect,
                icon: info.icon.to_string(),
                title: info.title.to_string(),
                text: result.text.clone(),
                elapsed_secs: result.elapsed_secs,
                reasoning: result.reasoning.clone(),
                failed: result.failed,
            });
        }

        let total_secs = round_2dp(sections.iter().map(|s| s.elapsed_secs).sum());

        Ok(Self {
            sections,
            total_secs,
            model: model.to_string(),
            resume_file: resume_file.to_string(),
            generated_at: Utc::now(),
        })
    }

    pub fn failed_count(&self) -> usize {
        self.sections.iter().filter(|s| s.failed).count()
    }

    /// The plain-text document offered for download
    pub fn download(&self, file_name: &str) -> Download {
        Download {
            file_name: file_name.to_string(),
            content_type: DOWNLOAD_CONTENT_TYPE.to_string(),
            body: self.plain_text(),
        }
    }

    pub fn plain_text(&self) -> String {
        let mut body = String::new();
        body.push_str(REPORT_TITLE);
        body.push_str("\n\n");
        for section in &self.sections {
            body.push_str(&format!(
                "{} {}: (Response time: {} seconds)\n{}\n\n",
                section.icon,
                section.title,
                format_secs(section.elapsed_secs),
                section.text
            ));
        }
        body.push_str(&format!("⏱️ Total Analysis Time: {} seconds\n", format_secs(self.total_secs)));
        body
    }
}

/// Analyse every aspect the session lacks, in fixed order, then build the report.
///
/// Returns how many aspects had to be filled in alongside the report.
pub async fn generate_complete_report<E, F>(
    session: &mut SessionContext,
    executor: &SequentialExecutor<E>,
    on_start: F,
) -> Result<(CompleteReport, usize)>
where
    E: InferenceEngine,
    F: FnMut(&AnalysisTask, usize, usize),
{
    let resume = session.resume().ok_or(ResumeAnalyzerError::NoResume)?.clone();
    let model = session.model().id.clone();

    let tasks: Vec<AnalysisTask> = session
        .missing_aspects()
        .into_iter()
        .map(|aspect| AnalysisTask {
            aspect,
            model: model.clone(),
            text: resume.text.clone(),
        })
        .collect();

    info!("Complete report needs {} of {} aspects", tasks.len(), Aspect::ALL.len());
    let filled = tasks.len();
    for (aspect, result) in executor.run_all(&tasks, on_start).await {
        session.record(aspect, result);
    }

    let report = CompleteReport::from_results(session.results(), &model, &resume.file_name)?;
    Ok((report, filled))
}
