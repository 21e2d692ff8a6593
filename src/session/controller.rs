//! Command dispatch: each user action mutates the session and yields a render model

use crate::config::Config;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::InputManager;
use crate::llm::inference::InferenceEngine;
use crate::llm::model_manager::ModelManager;
use crate::llm::{AnalysisResult, Aspect, ResumeAnalyzer};
use crate::output::report::{generate_complete_report, CompleteReport, Download};
use crate::session::context::SessionContext;
use crate::session::executor::{AnalysisTask, SequentialExecutor};
use log::info;
use std::path::PathBuf;

/// A discrete user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectModel(String),
    UploadFile(PathBuf),
    Analyze(Aspect),
    GenerateReport,
    Reset,
    Status,
}

/// Inline message shown alongside the view
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelView {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeView {
    pub file_name: String,
    pub char_count: usize,
    /// Whether prompts will only see the leading part of the text
    pub truncated: bool,
}

/// One aspect tab with its trigger and latest result
#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    pub aspect: Aspect,
    pub label: &'static str,
    pub header: &'static str,
    pub button: &'static str,
    pub result: Option<AnalysisResult>,
}

/// Everything the view layer needs to draw the current state
#[derive(Debug, Clone)]
pub struct RenderModel {
    pub model: ModelView,
    pub available_models: Vec<ModelView>,
    pub resume: Option<ResumeView>,
    pub tabs: Vec<TabView>,
    /// Aspect analysed by this command, if any
    pub focus: Option<Aspect>,
    pub report: Option<CompleteReport>,
    pub download: Option<Download>,
    pub notices: Vec<Notice>,
}

type TaskObserver = Box<dyn FnMut(&AnalysisTask, usize, usize) + Send>;

pub struct Controller<E> {
    session: SessionContext,
    executor: SequentialExecutor<E>,
    models: ModelManager,
    input: InputManager,
    max_resume_chars: usize,
    report_file_name: String,
    observer: Option<TaskObserver>,
}

impl<E: InferenceEngine> Controller<E> {
    pub fn new(engine: E, config: &Config) -> Result<Self> {
        let models = ModelManager::from_config(config);
        let session = SessionContext::new(models.default_model()?.clone());
        let executor = SequentialExecutor::new(ResumeAnalyzer::new(engine, &config.analysis));

        Ok(Self {
            session,
            executor,
            models,
            input: InputManager::new(),
            max_resume_chars: config.analysis.max_resume_chars,
            report_file_name: config.output.report_file_name.clone(),
            observer: None,
        })
    }

    /// Called before every inference call, e.g. to drive a busy indicator
    pub fn with_observer(mut self, observer: TaskObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<RenderModel> {
        let mut notices = Vec::new();
        let mut focus = None;
        let mut report = None;
        let mut download = None;

        match command {
            Command::SelectModel(query) => {
                let model = self.models.resolve(&query)?.clone();
                info!("Model selected: {}", model.id);
                notices.push(Notice::Info(format!("Using model {}", model.label)));
                self.session.select_model(model);
            }
            Command::UploadFile(path) => {
                let resume = self.input.load_resume(&path).await?;
                info!("Loaded {} ({} characters)", resume.file_name, resume.char_count());
                if resume.text.is_empty() {
                    notices.push(Notice::Info(format!(
                        "No text could be extracted from {}; it may be a scanned image",
                        resume.file_name
                    )));
                }
                self.session.set_resume(resume);
            }
            Command::Analyze(aspect) => {
                let resume = self.session.resume().ok_or(ResumeAnalyzerError::NoResume)?;
                let task = AnalysisTask {
                    aspect,
                    model: self.session.model().id.clone(),
                    text: resume.text.clone(),
                };
                if let Some(observer) = self.observer.as_mut() {
                    observer(&task, 0, 1);
                }
                let result = self.executor.run(&task).await;
                if result.failed {
                    notices.push(Notice::Error(result.text.clone()));
                }
                self.session.record(aspect, result);
                focus = Some(aspect);
            }
            Command::GenerateReport => {
                let observer = &mut self.observer;
                let (complete, filled) = generate_complete_report(
                    &mut self.session,
                    &self.executor,
                    |task, index, total| {
                        if let Some(observer) = observer.as_mut() {
                            observer(task, index, total);
                        }
                    },
                )
                .await?;

                if filled > 0 {
                    notices.push(Notice::Info(format!("Analyzed {} remaining aspect(s)", filled)));
                }
                for section in complete.sections.iter().filter(|s| s.failed) {
                    notices.push(Notice::Error(format!("{}: {}", section.title, section.text)));
                }
                download = Some(complete.download(&self.report_file_name));
                report = Some(complete);
            }
            Command::Reset => {
                self.session.reset();
                notices.push(Notice::Info("Session cleared".to_string()));
            }
            Command::Status => {}
        }

        Ok(RenderModel {
            focus,
            report,
            download,
            notices,
            ..self.render()
        })
    }

    /// Current view without running anything
    pub fn render(&self) -> RenderModel {
        let model = self.session.model();
        RenderModel {
            model: ModelView {
                id: model.id.clone(),
                label: model.label.clone(),
            },
            available_models: self
                .models
                .list_available_models()
                .iter()
                .map(|m| ModelView {
                    id: m.id.clone(),
                    label: m.label.clone(),
                })
                .collect(),
            resume: self.session.resume().map(|resume| ResumeView {
                file_name: resume.file_name.clone(),
                char_count: resume.char_count(),
                truncated: resume.char_count() > self.max_resume_chars,
            }),
            tabs: Aspect::ALL
                .into_iter()
                .map(|aspect| {
                    let info = aspect.info();
                    TabView {
                        aspect,
                        label: info.tab_label,
                        header: info.section_header,
                        button: info.button_label,
                        result: self.session.result(aspect).cloned(),
                    }
                })
                .collect(),
            focus: None,
            report: None,
            download: None,
            notices: Vec::new(),
        }
    }
}
