//! Scenario replay entry point.
//!
//! # Responsibility
//! - Replay a scripted visitor session against `folio_core` and print the
//!   resulting report as JSON.
//! - Keep output deterministic for quick local checks of markup contracts.

mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::{init_logging, LogTarget};
use std::path::PathBuf;

const STDERR_DEFAULT_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Replay portfolio page interaction scenarios")]
#[command(version)]
struct Cli {
    /// Scenario JSON file (markup plus scripted steps)
    scenario: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files (default: stderr)
    #[arg(long)]
    log_dir: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (target, fallback_level) = match cli.log_dir.as_deref() {
        Some(dir) => (
            LogTarget::directory(dir).map_err(anyhow::Error::msg)?,
            folio_core::default_log_level(),
        ),
        None => (LogTarget::Stderr, STDERR_DEFAULT_LEVEL),
    };
    let level = cli.log_level.as_deref().unwrap_or(fallback_level);
    init_logging(level, target)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let scenario = scenario::load_scenario(&cli.scenario)?;
    let report = scenario::run(&scenario)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize report")?;
    println!("{rendered}");
    Ok(())
}
