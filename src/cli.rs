//! CLI interface for the resume analyzer

use crate::llm::Aspect;
use crate::session::Command;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Analyze a PDF resume with a local Ollama model")]
#[command(long_about = "Upload a PDF resume and get skills, experience, education, improvement and ATS-friendliness analyses from a locally hosted language model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single aspect of a resume
    Analyze {
        /// Path to the resume (PDF)
        #[arg(short, long)]
        resume: PathBuf,

        /// Aspect: skills, experience, education, improvements, ats
        #[arg(short, long)]
        aspect: Aspect,

        /// Model identifier or label
        #[arg(short, long)]
        model: Option<String>,

        /// Print the model's reasoning segment instead of collapsing it
        #[arg(long)]
        show_reasoning: bool,
    },

    /// Analyze every aspect and produce the complete report
    Report {
        /// Path to the resume (PDF)
        #[arg(short, long)]
        resume: PathBuf,

        /// Model identifier or label
        #[arg(short, long)]
        model: Option<String>,

        /// Output format: console, text, markdown, json, html
        #[arg(short, long)]
        format: Option<String>,

        /// Directory to write the report download into
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Print the model's reasoning segment instead of collapsing it
        #[arg(long)]
        show_reasoning: bool,
    },

    /// Interactive session: upload, pick a model, analyze aspects, build the report
    Interactive {
        /// Resume to upload at start
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Model identifier or label
        #[arg(short, long)]
        model: Option<String>,

        /// Print the model's reasoning segment instead of collapsing it
        #[arg(long)]
        show_reasoning: bool,
    },

    /// Model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List selectable models and whether Ollama has them
    List,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// One line typed in the interactive session
#[derive(Debug, Clone, PartialEq)]
pub enum InteractiveInput {
    Dispatch(Command),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

pub const INTERACTIVE_HELP: &str = "\
Commands:
  model <id|label>     select the model for later analyses
  upload <file.pdf>    load a resume (clears earlier results)
  analyze <aspect>     skills | experience | education | improvements | ats
  report               analyze missing aspects and show the complete report
  save [dir]           write the last report download to disk
  status               show model, resume and analyzed aspects
  reset                clear the session
  help                 show this help
  quit                 leave";

/// Parse an interactive line; blank lines yield `None`
pub fn parse_interactive_line(line: &str) -> Result<Option<InteractiveInput>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let input = match verb.to_lowercase().as_str() {
        "model" if !rest.is_empty() => InteractiveInput::Dispatch(Command::SelectModel(rest.to_string())),
        "upload" if !rest.is_empty() => InteractiveInput::Dispatch(Command::UploadFile(PathBuf::from(rest))),
        "analyze" if !rest.is_empty() => InteractiveInput::Dispatch(Command::Analyze(rest.parse()?)),
        "report" => InteractiveInput::Dispatch(Command::GenerateReport),
        "status" => InteractiveInput::Dispatch(Command::Status),
        "reset" => InteractiveInput::Dispatch(Command::Reset),
        "save" => InteractiveInput::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => InteractiveInput::Help,
        "quit" | "exit" | "q" => InteractiveInput::Quit,
        "model" | "upload" | "analyze" => {
            return Err(format!("'{}' needs an argument. Type 'help' for usage.", verb));
        }
        _ => return Err(format!("Unknown command: {}. Type 'help' for usage.", verb)),
    };
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aspect_argument_parses() {
        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "--resume", "cv.pdf", "--aspect", "ats",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { aspect, model, .. } => {
                assert_eq!(aspect, Aspect::Ats);
                assert!(model.is_none());
            }
            _ => panic!("expected analyze"),
        }

        assert!(Cli::try_parse_from([
            "resume-analyzer", "analyze", "--resume", "cv.pdf", "--aspect", "hobbies",
        ])
        .is_err());
    }

    #[test]
    fn test_interactive_lines() {
        assert_eq!(parse_interactive_line("   ").unwrap(), None);
        assert_eq!(
            parse_interactive_line("upload ./My Resume.pdf").unwrap(),
            Some(InteractiveInput::Dispatch(Command::UploadFile(PathBuf::from("./My Resume.pdf"))))
        );
        assert_eq!(
            parse_interactive_line("model Deepseek R1 1.5B").unwrap(),
            Some(InteractiveInput::Dispatch(Command::SelectModel("Deepseek R1 1.5B".to_string())))
        );
        assert_eq!(
            parse_interactive_line("ANALYZE education").unwrap(),
            Some(InteractiveInput::Dispatch(Command::Analyze(Aspect::Education)))
        );
        assert_eq!(parse_interactive_line("save").unwrap(), Some(InteractiveInput::Save(None)));
        assert_eq!(parse_interactive_line("q").unwrap(), Some(InteractiveInput::Quit));
    }

    #[test]
    fn test_interactive_errors() {
        assert!(parse_interactive_line("analyze").is_err());
        assert!(parse_interactive_line("analyze hobbies").is_err());
        assert!(parse_interactive_line("dance").is_err());
    }
}
