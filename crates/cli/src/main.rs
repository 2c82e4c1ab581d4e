//! TaskLens CLI — the main entry point.
//!
//! Commands (each reads one JSON object on stdin, writes one on stdout):
//! - `priority`  — 4-factor priority for `{title, content}`
//! - `classify`  — 今すぐ/次に/いつか category for `{title, content}`
//! - `create`    — structured task from free `{text}`
//! - `summarize` — summary and keywords for `{title, content}`
//! - `suggest`   — next task from `{tasks: [...]}`

use clap::{Parser, Subcommand};
use tasklens_analysis::{Analyzer, Operation};
use tasklens_config::AppConfig;

mod io;

#[derive(Parser)]
#[command(
    name = "tasklens",
    about = "TaskLens — structured task analysis over text engines",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze task priority from title and content
    Priority,

    /// Classify a task into 今すぐ / 次に / いつか
    Classify,

    /// Create a structured task from free text
    Create,

    /// Summarize a task and extract keywords
    Summarize,

    /// Suggest the next task to work on from an existing task list
    Suggest,
}

impl Commands {
    fn operation(&self) -> Operation {
        match self {
            Commands::Priority => Operation::Priority,
            Commands::Classify => Operation::Classify,
            Commands::Create => Operation::Create,
            Commands::Summarize => Operation::Summarize,
            Commands::Suggest => Operation::Suggest,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays pure JSON
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let raw = io::read_stdin()?;

    let output = match io::parse_input(&raw) {
        Ok(input) => {
            let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
            let analyzer =
                Analyzer::new(config).map_err(|e| format!("Failed to build analyzer: {e}"))?;
            analyzer.dispatch(cli.command.operation(), input).await
        }
        // Malformed JSON still answers on stdout with the uniform error
        // shape; the exit status stays 0.
        Err(err) => err.to_body(),
    };

    io::write_output(&output)?;
    Ok(())
}
