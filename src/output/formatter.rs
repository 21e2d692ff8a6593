//! Output formatters: console view, download text and export formats

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::llm::analyzer::format_secs;
use crate::output::report::*;
use crate::session::controller::{Notice, RenderModel, TabView};
use askama::Template;
use colored::{Color, Colorize};
use pulldown_cmark::{html, Event, Parser};
use std::path::{Path, PathBuf};

/// Trait for formatting complete reports
pub trait OutputFormatter {
    fn format_report(&self, report: &CompleteReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal view with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    show_reasoning: bool,
}

/// The downloadable plain-text document
pub struct TextFormatter;

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    text_formatter: TextFormatter,
    markdown_formatter: MarkdownFormatter,
    json_formatter: JsonFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .section { margin: 25px 0; border-bottom: 1px solid #e9ecef; }
        .section h3 { color: #007acc; }
        .section.failed h3 { color: #dc3545; }
        .timing { color: #6c757d; font-size: 0.9em; }
        details { background: #f8f9fa; padding: 10px; border-radius: 6px; }
        .total { font-weight: bold; font-size: 1.2em; }
        .metadata { color: #6c757d; font-size: 0.9em; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>📊 Detailed Analysis Report</h1>
            <p>Generated: {{ generated_at }}</p>
        </div>
        {% for section in sections %}
        <div class="section{% if section.failed %} failed{% endif %}">
            <h3>{{ section.icon }} {{ section.title }}</h3>
            {{ section.body_html|safe }}
            {% if section.has_reasoning %}
            <details>
                <summary>💭 Reasoning</summary>
                {{ section.reasoning_html|safe }}
            </details>
            {% endif %}
            <p class="timing">⚡ Response time: {{ section.elapsed }} seconds</p>
        </div>
        {% endfor %}
        <p class="total">⏱️ Total Analysis Time: {{ total }} seconds</p>
        <div class="metadata">
            <p><strong>Model:</strong> {{ model }} | <strong>Resume:</strong> {{ resume_file }}</p>
            <p>Resume Analyzer v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    sections: Vec<HtmlSection>,
    total: String,
    model: String,
    resume_file: String,
    version: String,
}

struct HtmlSection {
    icon: String,
    title: String,
    body_html: String,
    has_reasoning: bool,
    reasoning_html: String,
    elapsed: String,
    failed: bool,
}

/// Render model output as HTML, escaping any raw HTML it contains
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_reasoning: bool) -> Self {
        Self { use_colors, show_reasoning }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_caption(&self, elapsed_secs: f64) -> String {
        self.colorize(&format!("⚡ Response time: {} seconds", format_secs(elapsed_secs)), Color::BrightBlack)
    }

    fn format_reasoning(&self, reasoning: &Option<String>) -> String {
        match reasoning {
            Some(reasoning) if self.show_reasoning => format!(
                "{}\n{}\n",
                self.colorize("💭 Reasoning:", Color::Magenta),
                self.colorize(reasoning, Color::BrightBlack)
            ),
            Some(reasoning) => format!(
                "{}\n",
                self.colorize(
                    &format!("💭 Reasoning hidden ({} characters, use --show-reasoning)", reasoning.chars().count()),
                    Color::BrightBlack
                )
            ),
            None => String::new(),
        }
    }

    /// One aspect tab after its button was pressed
    pub fn format_tab(&self, tab: &TabView) -> String {
        let mut output = self.format_header(tab.header, 2);
        match &tab.result {
            Some(result) => {
                output.push_str(&self.format_reasoning(&result.reasoning));
                if result.failed {
                    output.push_str(&self.colorize(&result.text, Color::Red));
                } else {
                    output.push_str(&result.text);
                }
                output.push('\n');
                output.push_str(&self.format_caption(result.elapsed_secs));
                output.push('\n');
            }
            None => {
                output.push_str(&format!("Not analyzed yet. Run: analyze {}\n", tab.aspect));
            }
        }
        output
    }

    pub fn format_notice(&self, notice: &Notice) -> String {
        match notice {
            Notice::Info(message) => format!("ℹ️  {}", self.colorize(message, Color::Cyan)),
            Notice::Error(message) => format!("❌ {}", self.colorize(message, Color::Red)),
        }
    }

    /// Session overview: model, resume and which tabs hold results
    pub fn format_status(&self, view: &RenderModel) -> String {
        let mut output = self.format_header("📄 Resume Analyzer", 1);
        output.push_str(&format!("Model: {} ({})\n", view.model.label, view.model.id));
        match &view.resume {
            Some(resume) => {
                output.push_str(&format!(
                    "Resume: {} ({} characters{})\n",
                    resume.file_name,
                    resume.char_count,
                    if resume.truncated { ", prompts use the leading part" } else { "" }
                ));
            }
            None => output.push_str("Resume: none uploaded (upload <path.pdf>)\n"),
        }
        output.push('\n');
        for tab in &view.tabs {
            let state = match &tab.result {
                Some(result) if result.failed => self.colorize("failed", Color::Red),
                Some(result) => self.colorize(&format!("done in {} s", format_secs(result.elapsed_secs)), Color::Green),
                None => self.colorize("pending", Color::Yellow),
            };
            output.push_str(&format!("  [{}] {:<20} {}\n", tab.aspect, tab.label, state));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &CompleteReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("📊 Detailed Analysis Report", 1));

        for (index, section) in report.sections.iter().enumerate() {
            if index > 0 {
                output.push_str(&self.colorize(&"─".repeat(60), Color::BrightBlack));
                output.push('\n');
            }
            output.push_str(&self.format_header(&format!("{} {}", section.icon, section.title), 3));
            output.push_str(&self.format_reasoning(&section.reasoning));
            if section.failed {
                output.push_str(&self.colorize(&section.text, Color::Red));
            } else {
                output.push_str(&section.text);
            }
            output.push('\n');
            output.push_str(&self.format_caption(section.elapsed_secs));
            output.push('\n');
        }

        output.push_str(&self.format_header(
            &format!("⏱️ Total Analysis Time: {} seconds", format_secs(report.total_secs)),
            2,
        ));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &CompleteReport) -> Result<String> {
        Ok(report.plain_text())
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &CompleteReport) -> Result<String> {
        let mut output = String::new();
        output.push_str("# 📊 Detailed Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Model:** `{}` | **Resume:** `{}`\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.model,
                report.resume_file
            ));
        }

        for section in &report.sections {
            output.push_str(&format!("### {} {}\n\n", section.icon, section.title));
            output.push_str(&section.text);
            output.push_str("\n\n");
            if let Some(reasoning) = &section.reasoning {
                output.push_str("<details><summary>💭 Reasoning</summary>\n\n");
                output.push_str(reasoning);
                output.push_str("\n\n</details>\n\n");
            }
            output.push_str(&format!("*⚡ Response time: {} seconds*\n\n---\n\n", format_secs(section.elapsed_secs)));
        }

        output.push_str(&format!("### ⏱️ Total Analysis Time: {} seconds\n", format_secs(report.total_secs)));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &CompleteReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &CompleteReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            sections: report
                .sections
                .iter()
                .map(|section| HtmlSection {
                    icon: section.icon.clone(),
                    title: section.title.clone(),
                    body_html: markdown_to_html(&section.text),
                    has_reasoning: section.reasoning.is_some(),
                    reasoning_html: section
                        .reasoning
                        .as_deref()
                        .map(markdown_to_html)
                        .unwrap_or_default(),
                    elapsed: format_secs(section.elapsed_secs),
                    failed: section.failed,
                })
                .collect(),
            total: format_secs(report.total_secs),
            model: report.model.clone(),
            resume_file: report.resume_file.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &CompleteReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, show_reasoning: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_reasoning),
            text_formatter: TextFormatter,
            markdown_formatter: MarkdownFormatter::new(true),
            json_formatter: JsonFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }

    pub fn generate_report(&self, report: &CompleteReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Text => self.text_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_output_format(format: &str) -> std::result::Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "text" | "txt" => Ok(OutputFormat::Text),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "json" => Ok(OutputFormat::Json),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, text, markdown, json, html",
            format
        )),
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// File name for an export: the download name with the format's extension
pub fn export_file_name(format: &OutputFormat, download_name: &str) -> String {
    let extension = match format {
        OutputFormat::Console | OutputFormat::Text => return download_name.to_string(),
        OutputFormat::Markdown => "md",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
    };
    PathBuf::from(download_name)
        .with_extension(extension)
        .to_string_lossy()
        .to_string()
}
