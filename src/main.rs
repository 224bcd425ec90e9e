//! questionnaire CLI
//!
//! Ask a fixed list of questions in the terminal and print the answers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use questionnaire::config::{Questionnaire, load_questionnaire};
use questionnaire::logging::{default_log_path, init_tracing};
use questionnaire::report::format_answers;
use questionnaire::tui::run::{Outcome, RunOptions, run};
use questionnaire::types::OutputFormat;

/// Exit code for a questionnaire abandoned with Ctrl+C / Esc.
const EXIT_ABORTED: u8 = 130;

#[derive(Parser)]
#[command(name = "questionnaire")]
#[command(about = "Ask a fixed list of questions one at a time and print the answers")]
#[command(version)]
struct Cli {
    /// Questionnaire file (JSON). Default: built-in two-question demo
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Output format for the answers
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Log file (default: <cache dir>/questionnaire/debug.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "questionnaire=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Exit as soon as the last question is answered
    #[arg(long)]
    exit_on_complete: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_run(cli) {
        Ok(Outcome::Completed(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Aborted) => ExitCode::from(EXIT_ABORTED),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(cli: Cli) -> Result<Outcome, String> {
    let log_path = cli.log_file.unwrap_or_else(default_log_path);
    init_tracing(&log_path, cli.log_level.as_deref()).map_err(|e| e.to_string())?;

    let questionnaire = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading questionnaire");
            load_questionnaire(path).map_err(|e| format!("{}: {}", path.display(), e))?
        }
        None => Questionnaire::default(),
    };

    let options = RunOptions {
        exit_on_complete: cli.exit_on_complete,
    };
    let outcome = run(&questionnaire, options).map_err(|e| {
        tracing::error!(error = %e, "terminal failure");
        format!("terminal: {}", e)
    })?;

    match &outcome {
        Outcome::Completed(answers) => {
            print!("{}", format_answers(answers, cli.format.into()));
        }
        Outcome::Aborted => {
            tracing::info!("aborted before completion, nothing printed");
        }
    }

    Ok(outcome)
}
