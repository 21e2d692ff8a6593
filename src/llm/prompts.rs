//! Fixed prompt catalog: one instruction template per analysis aspect

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker every template ends with; the resume text is appended right after it
pub const RESUME_MARKER: &str = "Resume:\n";

/// One fixed category of resume analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Skills,
    Experience,
    Education,
    Improvements,
    Ats,
}

impl Aspect {
    /// Fixed enumeration order used by every report
    pub const ALL: [Aspect; 5] = [
        Aspect::Skills,
        Aspect::Experience,
        Aspect::Education,
        Aspect::Improvements,
        Aspect::Ats,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Aspect::Skills => "skills",
            Aspect::Experience => "experience",
            Aspect::Education => "education",
            Aspect::Improvements => "improvements",
            Aspect::Ats => "ats",
        }
    }

    pub fn info(&self) -> &'static AspectInfo {
        match self {
            Aspect::Skills => &SKILLS_INFO,
            Aspect::Experience => &EXPERIENCE_INFO,
            Aspect::Education => &EDUCATION_INFO,
            Aspect::Improvements => &IMPROVEMENTS_INFO,
            Aspect::Ats => &ATS_INFO,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Aspect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skills" => Ok(Aspect::Skills),
            "experience" => Ok(Aspect::Experience),
            "education" => Ok(Aspect::Education),
            "improvements" => Ok(Aspect::Improvements),
            "ats" | "ats-compatibility" => Ok(Aspect::Ats),
            _ => Err(format!(
                "Invalid aspect: {}. Supported: skills, experience, education, improvements, ats",
                s
            )),
        }
    }
}

/// Display data for one aspect
#[derive(Debug)]
pub struct AspectInfo {
    pub icon: &'static str,
    /// Title used in the combined report and the download
    pub title: &'static str,
    pub tab_label: &'static str,
    /// Header shown above a single-aspect result
    pub section_header: &'static str,
    pub button_label: &'static str,
}

static SKILLS_INFO: AspectInfo = AspectInfo {
    icon: "🎯",
    title: "Skills",
    tab_label: "Skills",
    section_header: "Skills Analysis",
    button_label: "Analyze Skills",
};

static EXPERIENCE_INFO: AspectInfo = AspectInfo {
    icon: "💼",
    title: "Work Experience",
    tab_label: "Experience",
    section_header: "Experience Analysis",
    button_label: "Analyze Experience",
};

static EDUCATION_INFO: AspectInfo = AspectInfo {
    icon: "🎓",
    title: "Education",
    tab_label: "Education",
    section_header: "Education Analysis",
    button_label: "Analyze Education",
};

static IMPROVEMENTS_INFO: AspectInfo = AspectInfo {
    icon: "📈",
    title: "Suggested Improvements",
    tab_label: "Improvements",
    section_header: "Suggested Improvements",
    button_label: "Get Improvements",
};

static ATS_INFO: AspectInfo = AspectInfo {
    icon: "🤖",
    title: "ATS Compatibility",
    tab_label: "ATS Compatibility",
    section_header: "ATS Compatibility",
    button_label: "Check ATS Compatibility",
};

/// Which family of templates to send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Plain instruction, answer only
    #[default]
    Plain,
    /// Ask for a `<think>` preamble before the final answer
    Reasoning,
}

/// Read-only lookup of instruction templates
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCatalog {
    style: PromptStyle,
}

impl PromptCatalog {
    pub fn new(style: PromptStyle) -> Self {
        Self { style }
    }

    pub fn template(&self, aspect: Aspect) -> &'static str {
        match (self.style, aspect) {
            (PromptStyle::Plain, Aspect::Skills) => SKILLS_PLAIN,
            (PromptStyle::Plain, Aspect::Experience) => EXPERIENCE_PLAIN,
            (PromptStyle::Plain, Aspect::Education) => EDUCATION_PLAIN,
            (PromptStyle::Plain, Aspect::Improvements) => IMPROVEMENTS_PLAIN,
            (PromptStyle::Plain, Aspect::Ats) => ATS_PLAIN,
            (PromptStyle::Reasoning, Aspect::Skills) => SKILLS_REASONING,
            (PromptStyle::Reasoning, Aspect::Experience) => EXPERIENCE_REASONING,
            (PromptStyle::Reasoning, Aspect::Education) => EDUCATION_REASONING,
            (PromptStyle::Reasoning, Aspect::Improvements) => IMPROVEMENTS_REASONING,
            (PromptStyle::Reasoning, Aspect::Ats) => ATS_REASONING,
        }
    }

    /// Template followed directly by the (already truncated) resume text
    pub fn render(&self, aspect: Aspect, resume_text: &str) -> String {
        let template = self.template(aspect);
        let mut prompt = String::with_capacity(template.len() + resume_text.len());
        prompt.push_str(template);
        prompt.push_str(resume_text);
        prompt
    }
}

const SKILLS_PLAIN: &str = "Analyze the following resume and list all technical and soft skills mentioned. Format the output in bullet points:\n\nResume:\n";

const EXPERIENCE_PLAIN: &str = "Analyze the following resume and evaluate the work experience. Provide insights about career progression and key achievements:\n\nResume:\n";

const EDUCATION_PLAIN: &str = "Analyze the following resume and evaluate the educational background. Comment on the relevance and strength of the education:\n\nResume:\n";

const IMPROVEMENTS_PLAIN: &str = "Analyze the following resume and suggest specific improvements. Format suggestions in bullet points:\n\nResume:\n";

const ATS_PLAIN: &str = "Analyze if this resume is ATS (Applicant Tracking System) friendly and provide specific suggestions for improvement:\n\nResume:\n";

const SKILLS_REASONING: &str = "Analyze the following resume and list all technical and soft skills mentioned. First reason step by step inside <think></think> tags, then give the final answer after the closing tag, formatted in bullet points:\n\nResume:\n";

const EXPERIENCE_REASONING: &str = "Analyze the following resume and evaluate the work experience. First reason step by step inside <think></think> tags, then give the final answer after the closing tag with insights about career progression and key achievements:\n\nResume:\n";

const EDUCATION_REASONING: &str = "Analyze the following resume and evaluate the educational background. First reason step by step inside <think></think> tags, then give the final answer after the closing tag, commenting on the relevance and strength of the education:\n\nResume:\n";

const IMPROVEMENTS_REASONING: &str = "Analyze the following resume and suggest specific improvements. First reason step by step inside <think></think> tags, then give the final answer after the closing tag, formatted in bullet points:\n\nResume:\n";

const ATS_REASONING: &str = "Analyze if this resume is ATS (Applicant Tracking System) friendly. First reason step by step inside <think></think> tags, then give the final answer after the closing tag with specific suggestions for improvement:\n\nResume:\n";
