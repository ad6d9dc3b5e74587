//! Deck CLI - play gesture scenarios against a headless card
//!
//! Commands:
//! - `run` - drive a card through a JSON scenario and report the outcome
//! - `config` - print the default card configuration as TOML

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_card::CardConfig;
use deck_cli::{run_loaded_scenario, RunConfig, Scenario};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deck", about = "Deck CLI - expandable card scenario runner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a gesture scenario against a headless card.
    Run {
        /// Card configuration (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scenario file (JSON).
        #[arg(short, long)]
        scenario: PathBuf,

        /// Simulated frame interval in milliseconds.
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,

        /// Print the report as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default card configuration as TOML.
    Config,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            scenario,
            frame_ms,
            json,
        } => cmd_run(config.as_deref(), &scenario, frame_ms, json),
        Commands::Config => {
            let rendered = CardConfig::default()
                .to_toml_string()
                .context("Failed to render default config")?;
            print!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_run(config: Option<&Path>, scenario: &Path, frame_ms: u64, json: bool) -> Result<ExitCode> {
    let card_config = match config {
        Some(path) => CardConfig::from_path(path)
            .with_context(|| format!("Failed to load card config {}", path.display()))?,
        None => CardConfig::default(),
    };
    let scenario = Scenario::from_path(scenario)?;

    let outcome = run_loaded_scenario(&scenario, card_config, RunConfig { frame_ms })?;
    let report = outcome.report();
    if json {
        report.write_json(&mut std::io::stdout().lock())?;
    } else {
        print!("{}", report.render_text());
    }

    if outcome.is_failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
