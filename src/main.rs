//! Resume analyzer: AI-powered resume analysis against a local Ollama model

use clap::Parser;
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, InteractiveInput, ModelAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::llm::model_manager::ModelManager;
use resume_analyzer::llm::OllamaEngine;
use resume_analyzer::output::formatter::{
    export_file_name, parse_output_format, save_report_to_file, ConsoleFormatter, ReportGenerator,
};
use resume_analyzer::output::progress::BusyIndicator;
use resume_analyzer::output::Download;
use resume_analyzer::session::{AnalysisTask, Command, Controller, RenderModel};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze { resume, aspect, model, show_reasoning } => {
            let busy = BusyIndicator::new();
            let mut controller = build_controller(&config, &busy)?;
            let console = ConsoleFormatter::new(config.output.color_output, show_reasoning || config.output.show_reasoning);

            prepare_session(&mut controller, &busy, &resume, model).await?;

            busy.start(&format!("Analyzing {}...", aspect));
            let view = controller.dispatch(Command::Analyze(aspect)).await;
            busy.stop();
            let view = view?;

            print_notices(&console, &view);
            if let Some(tab) = view.tabs.iter().find(|tab| Some(tab.aspect) == view.focus) {
                println!("{}", console.format_tab(tab));
            }
        }

        Commands::Report { resume, model, format, save, show_reasoning } => {
            let format = match format {
                Some(format) => parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let busy = if format == OutputFormat::Console {
                BusyIndicator::new()
            } else {
                BusyIndicator::hidden()
            };
            let mut controller = build_controller(&config, &busy)?;
            let generator = ReportGenerator::with_options(
                config.output.color_output,
                show_reasoning || config.output.show_reasoning,
            );

            prepare_session(&mut controller, &busy, &resume, model).await?;

            busy.start("Generating complete report...");
            let view = controller.dispatch(Command::GenerateReport).await;
            busy.stop();
            let view = view?;

            if format == OutputFormat::Console {
                print_notices(generator.console(), &view);
            }
            let report = view.report.as_ref().ok_or_else(|| {
                ResumeAnalyzerError::OutputFormatting("Report was not produced".to_string())
            })?;
            let rendered = generator.generate_report(report, &format)?;
            println!("{}", rendered);

            if let Some(dir) = save {
                if let Some(download) = &view.download {
                    let path = save_download(download, &dir)?;
                    println!("💾 Saved {} ({})", path.display(), download.content_type);
                }
                if !matches!(format, OutputFormat::Console | OutputFormat::Text) {
                    let path = dir.join(export_file_name(&format, &config.output.report_file_name));
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Saved {}", path.display());
                }
            }
        }

        Commands::Interactive { resume, model, show_reasoning } => {
            let busy = BusyIndicator::new();
            let mut controller = build_controller(&config, &busy)?;
            let generator = ReportGenerator::with_options(
                config.output.color_output,
                show_reasoning || config.output.show_reasoning,
            );
            run_interactive(&mut controller, &busy, &generator, &config, resume, model).await?;
        }

        Commands::Models { action } => match action {
            ModelAction::List => {
                let engine = OllamaEngine::new(&config.engine)?;
                let manager = ModelManager::from_config(&config);

                println!("📚 Available Models (server: {})\n", engine.base_url());
                for status in manager.statuses(&engine).await {
                    let marker = if status.is_default { " [default]" } else { "" };
                    let installed = match status.installed {
                        Some(true) => "✅ Installed",
                        Some(false) => "⬇️  Not pulled",
                        None => "❓ Server unreachable",
                    };
                    println!("  • {} ({}){} [{}]", status.label, status.id, marker, installed);
                    println!("    {}", status.description);
                    if status.installed == Some(false) {
                        println!("    💡 Pull with: ollama pull {}", status.id);
                    }
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Ollama URL: {}", config.engine.base_url);
                println!("Temperature: {}", config.engine.temperature);
                println!("Timeout: {} seconds", config.engine.timeout_secs);
                println!("Stop sequences: {:?}", config.engine.stop);
                println!("Default model: {}", config.models.default_model);
                println!("Max resume characters: {}", config.analysis.max_resume_chars);
                println!("Prompt style: {:?}", config.analysis.prompt_style);
                println!("Unclosed <think> policy: {:?}", config.analysis.unclosed_think);
                println!("Output format: {:?}", config.output.format);
                println!("Report file: {}", config.output.report_file_name);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn build_controller(config: &Config, busy: &BusyIndicator) -> Result<Controller<OllamaEngine>> {
    let engine = OllamaEngine::new(&config.engine)?;
    let busy = busy.clone();
    let controller = Controller::new(engine, config)?.with_observer(Box::new(move |task: &AnalysisTask, index: usize, total: usize| {
        if total > 1 {
            busy.set_message(format!("Analyzing {}... ({}/{})", task.aspect, index + 1, total));
        } else {
            busy.set_message(format!("Analyzing {}...", task.aspect));
        }
    }));
    Ok(controller)
}

async fn prepare_session(
    controller: &mut Controller<OllamaEngine>,
    busy: &BusyIndicator,
    resume: &Path,
    model: Option<String>,
) -> Result<()> {
    if let Some(model) = model {
        controller.dispatch(Command::SelectModel(model)).await?;
    }

    busy.start("Extracting text from PDF...");
    let view = controller.dispatch(Command::UploadFile(resume.to_path_buf())).await;
    busy.stop();
    let view = view?;

    if let Some(resume) = &view.resume {
        info!("Resume {} loaded, analyzing with {}", resume.file_name, view.model.id);
    }
    Ok(())
}

fn print_notices(console: &ConsoleFormatter, view: &RenderModel) {
    for notice in &view.notices {
        println!("{}", console.format_notice(notice));
    }
}

fn save_download(download: &Download, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(&download.file_name);
    save_report_to_file(&download.body, &path)?;
    Ok(path)
}

async fn run_interactive(
    controller: &mut Controller<OllamaEngine>,
    busy: &BusyIndicator,
    generator: &ReportGenerator,
    config: &Config,
    resume: Option<PathBuf>,
    model: Option<String>,
) -> Result<()> {
    let console = generator.console();

    if let Some(model) = model {
        match controller.dispatch(Command::SelectModel(model)).await {
            Ok(view) => print_notices(console, &view),
            Err(e) => println!("❌ {}", e),
        }
    }
    if let Some(path) = resume {
        busy.start("Extracting text from PDF...");
        let outcome = controller.dispatch(Command::UploadFile(path)).await;
        busy.stop();
        if let Err(e) = outcome {
            println!("❌ {}", e);
        }
    }

    println!("{}", console.format_status(&controller.render()));
    println!("{}\n", cli::INTERACTIVE_HELP);

    let mut last_download: Option<Download> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("resume> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = match cli::parse_interactive_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(message) => {
                println!("❌ {}", message);
                continue;
            }
        };

        let command = match input {
            InteractiveInput::Quit => break,
            InteractiveInput::Help => {
                println!("{}", cli::INTERACTIVE_HELP);
                continue;
            }
            InteractiveInput::Save(dir) => {
                match &last_download {
                    Some(download) => {
                        let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                        match save_download(download, &dir) {
                            Ok(path) => println!("💾 Saved {} ({})", path.display(), download.content_type),
                            Err(e) => println!("❌ {}", e),
                        }
                    }
                    None => println!("❌ No report yet. Run 'report' first."),
                }
                continue;
            }
            InteractiveInput::Dispatch(command) => command,
        };

        let busy_message = match &command {
            Command::UploadFile(_) => Some("Extracting text from PDF...".to_string()),
            Command::Analyze(aspect) => Some(format!("Analyzing {}...", aspect)),
            Command::GenerateReport => Some("Generating complete report...".to_string()),
            _ => None,
        };
        if let Some(message) = &busy_message {
            busy.start(message);
        }
        let outcome = controller.dispatch(command).await;
        busy.stop();

        let view = match outcome {
            Ok(view) => view,
            Err(e) => {
                println!("❌ {}", e);
                continue;
            }
        };

        print_notices(console, &view);
        if let Some(tab) = view.tabs.iter().find(|tab| Some(tab.aspect) == view.focus) {
            println!("{}", console.format_tab(tab));
        } else if let Some(report) = &view.report {
            println!("{}", generator.generate_report(report, &OutputFormat::Console)?);
            println!("💾 Download ready: '{}'. Type 'save [dir]' to write it.", config.output.report_file_name);
        } else {
            println!("{}", console.format_status(&view));
        }

        if view.download.is_some() {
            last_download = view.download;
        } else if view.tabs.iter().all(|tab| tab.result.is_none()) {
            // upload and reset clear results, so the previous report is stale
            last_download = None;
        }
    }

    println!("👋 Bye");
    Ok(())
}
