//! Analysis invoker: prompt building, timing and response parsing

use crate::config::AnalysisConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::llm::inference::InferenceEngine;
use crate::llm::prompts::{Aspect, PromptCatalog};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::{Duration, Instant};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// What to do with a response that opens `<think>` but never closes it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnclosedThinkPolicy {
    /// Everything after the marker is reasoning; there is no answer
    ReasoningOnly,
    /// Treat the response as unparseable
    Error,
    /// Use the whole response (minus the marker) as the answer
    #[default]
    WholeResponse,
}

/// Model output split into the answer and the optional reasoning preamble
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub answer: String,
    pub reasoning: Option<String>,
}

/// Outcome of analysing one aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    /// Wall-clock seconds, rounded to two decimals; 0 on failure
    pub elapsed_secs: f64,
    pub reasoning: Option<String>,
    pub failed: bool,
}

impl AnalysisResult {
    pub fn failure(cause: &ResumeAnalyzerError) -> Self {
        Self {
            text: ResumeAnalyzerError::AnalysisFailed(cause.to_string()).to_string(),
            elapsed_secs: 0.0,
            reasoning: None,
            failed: true,
        }
    }
}

/// Split `<think>X</think>Y` into reasoning `X` and answer `Y`
pub fn parse_thinking(raw: &str, policy: UnclosedThinkPolicy) -> Result<ParsedResponse> {
    let Some(open) = raw.find(THINK_OPEN) else {
        return Ok(ParsedResponse {
            answer: raw.trim().to_string(),
            reasoning: None,
        });
    };

    let after_open = &raw[open + THINK_OPEN.len()..];
    if let Some(close) = after_open.find(THINK_CLOSE) {
        let reasoning = after_open[..close].trim();
        let answer = after_open[close + THINK_CLOSE.len()..].trim();
        return Ok(ParsedResponse {
            answer: answer.to_string(),
            reasoning: (!reasoning.is_empty()).then(|| reasoning.to_string()),
        });
    }

    warn!("Response opened {} without closing it (policy: {:?})", THINK_OPEN, policy);
    match policy {
        UnclosedThinkPolicy::ReasoningOnly => {
            let reasoning = after_open.trim();
            Ok(ParsedResponse {
                answer: String::new(),
                reasoning: (!reasoning.is_empty()).then(|| reasoning.to_string()),
            })
        }
        UnclosedThinkPolicy::Error => Err(ResumeAnalyzerError::ThinkParse),
        UnclosedThinkPolicy::WholeResponse => Ok(ParsedResponse {
            answer: format!("{}{}", &raw[..open], after_open).trim().to_string(),
            reasoning: None,
        }),
    }
}

/// Keep the first `max_chars` characters, appending `marker` only when something was cut
pub fn truncate_resume<'a>(text: &'a str, max_chars: usize, marker: &str) -> Cow<'a, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], marker)),
    }
}

pub fn round_secs(elapsed: Duration) -> f64 {
    round_2dp(elapsed.as_secs_f64())
}

pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Seconds as shown to the user: whole values keep one decimal (`2.0`, `1.25`)
pub fn format_secs(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{:.1}", secs)
    } else {
        secs.to_string()
    }
}

/// Runs one aspect's prompt through the engine
pub struct ResumeAnalyzer<E> {
    engine: E,
    catalog: PromptCatalog,
    max_resume_chars: usize,
    truncation_marker: String,
    unclosed_think: UnclosedThinkPolicy,
}

impl<E: InferenceEngine> ResumeAnalyzer<E> {
    pub fn new(engine: E, config: &AnalysisConfig) -> Self {
        Self {
            engine,
            catalog: PromptCatalog::new(config.prompt_style),
            max_resume_chars: config.max_resume_chars,
            truncation_marker: config.truncation_marker.clone(),
            unclosed_think: config.unclosed_think,
        }
    }

    pub fn build_prompt(&self, text: &str, aspect: Aspect) -> String {
        let text = truncate_resume(text, self.max_resume_chars, &self.truncation_marker);
        self.catalog.render(aspect, &text)
    }

    /// Never fails: engine or parse errors become a placeholder with zero duration
    pub async fn analyze(&self, text: &str, aspect: Aspect, model: &str) -> AnalysisResult {
        let prompt = self.build_prompt(text, aspect);
        debug!("Prompt for {} is {} characters", aspect, prompt.chars().count());
        info!("Analyzing {} with {}", aspect, model);

        let start = Instant::now();
        let outcome = self.engine.generate(model, &prompt).await;
        let elapsed = round_secs(start.elapsed());

        let parsed = outcome
            .and_then(|raw| parse_thinking(&raw, self.unclosed_think))
            .and_then(|parsed| {
                // a reasoning block with nothing after it is no answer at all
                if parsed.answer.is_empty() && self.unclosed_think != UnclosedThinkPolicy::ReasoningOnly {
                    Err(ResumeAnalyzerError::EmptyResponse)
                } else {
                    Ok(parsed)
                }
            });
        match parsed {
            Ok(parsed) => {
                info!("Finished {} in {} seconds", aspect, elapsed);
                AnalysisResult {
                    text: parsed.answer,
                    elapsed_secs: elapsed,
                    reasoning: parsed.reasoning,
                    failed: false,
                }
            }
            Err(e) => {
                error!("Error during analysis of {}: {}", aspect, e);
                AnalysisResult::failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_think_segment_is_split_and_trimmed() {
        let parsed = parse_thinking(
            "<think>\n  weighing the skills  \n</think>\n\n- Rust\n- SQL\n",
            UnclosedThinkPolicy::default(),
        )
        .unwrap();
        assert_eq!(parsed.answer, "- Rust\n- SQL");
        assert_eq!(parsed.reasoning.as_deref(), Some("weighing the skills"));
    }

    #[test]
    fn test_no_marker_keeps_whole_response() {
        let parsed = parse_thinking("  Strong background.  ", UnclosedThinkPolicy::Error).unwrap();
        assert_eq!(parsed.answer, "Strong background.");
        assert!(parsed.reasoning.is_none());
    }

    #[test]
    fn test_empty_think_block_has_no_reasoning() {
        let parsed = parse_thinking("<think></think>Answer", UnclosedThinkPolicy::default()).unwrap();
        assert_eq!(parsed.answer, "Answer");
        assert!(parsed.reasoning.is_none());
    }

    #[test]
    fn test_unclosed_marker_policies() {
        let raw = "<think>still reasoning about education";

        let whole = parse_thinking(raw, UnclosedThinkPolicy::WholeResponse).unwrap();
        assert_eq!(whole.answer, "still reasoning about education");
        assert!(whole.reasoning.is_none());

        let reasoning = parse_thinking(raw, UnclosedThinkPolicy::ReasoningOnly).unwrap();
        assert_eq!(reasoning.answer, "");
        assert_eq!(reasoning.reasoning.as_deref(), Some("still reasoning about education"));

        assert!(matches!(
            parse_thinking(raw, UnclosedThinkPolicy::Error),
            Err(ResumeAnalyzerError::ThinkParse)
        ));
    }

    #[test]
    fn test_truncation_boundary() {
        let exact = "a".repeat(2000);
        assert_eq!(truncate_resume(&exact, 2000, "..."), exact.as_str());

        let long = format!("{}{}", "b".repeat(2000), "tail");
        let cut = truncate_resume(&long, 2000, "...");
        assert_eq!(cut, format!("{}...", "b".repeat(2000)));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(2001);
        let cut = truncate_resume(&text, 2000, "...");
        assert_eq!(cut.chars().count(), 2003);
        assert!(cut.starts_with(&"é".repeat(2000)));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_secs(Duration::from_millis(1234)), 1.23);
        assert_eq!(round_secs(Duration::from_millis(1239)), 1.24);
        assert_eq!(round_2dp(0.0), 0.0);
    }

    #[test]
    fn test_whole_seconds_keep_one_decimal() {
        assert_eq!(format_secs(2.0), "2.0");
        assert_eq!(format_secs(0.0), "0.0");
        assert_eq!(format_secs(1.25), "1.25");
        assert_eq!(format_secs(11.1), "11.1");
    }

    #[test]
    fn test_failure_placeholder() {
        let result = AnalysisResult::failure(&ResumeAnalyzerError::EmptyResponse);
        assert!(result.failed);
        assert_eq!(result.elapsed_secs, 0.0);
        assert_eq!(result.text, "Analysis failed: Model returned an empty response");
    }
}
