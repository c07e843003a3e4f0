//! biorisk - Main CLI Entry Point
//!
//! Reads biomarker panels as JSON, writes risk reports to stdout.
//! Any failure prints a message to stderr and exits with status 1. A batch
//! still writes every outcome before failing when some entries failed.

use anyhow::{bail, Context, Result};
use biorisk::batch::{failure_count, parse_batch_input, BatchEvaluator};
use biorisk::cli::{Args, Commands, Config};
use biorisk::logging::init_logging;
use biorisk::ranges::ReferenceRangeTable;
use biorisk::{DisplayMode, RiskEngine};
use clap::Parser;
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    if let Some(model) = &args.model {
        config.model.artifact_path = model.to_string_lossy().into_owned();
    }

    init_logging(args.verbosity().filter(&config.logging.level));
    debug!(?config, "configuration loaded");

    let display = DisplayMode::new(args.format);

    match args.command() {
        Commands::Predict { input } => {
            let engine = RiskEngine::from_config(&config).context("Failed to initialize risk engine")?;
            let request = read_input(input.as_deref())?;
            let report = engine.evaluate_json(&request)?;
            println!("{}", display.render_report(&report)?);
        }
        Commands::Batch { input } => {
            let engine = RiskEngine::from_config(&config).context("Failed to initialize risk engine")?;
            let requests = parse_batch_input(&read_input(input.as_deref())?)?;
            let evaluator = BatchEvaluator::new(Arc::new(engine), config.batch.max_parallel);
            let outcomes = evaluator.evaluate_all(requests).await;
            println!("{}", display.render_batch(&outcomes)?);

            let failed = failure_count(&outcomes);
            if failed > 0 {
                bail!("{} of {} batch entries failed", failed, outcomes.len());
            }
        }
        Commands::Ranges => {
            let table = match &config.ranges {
                Some(ranges) => ReferenceRangeTable::from_ranges(ranges.clone())?,
                None => ReferenceRangeTable::default(),
            };
            println!("{}", display.render_ranges(&table)?);
        }
        Commands::Config => {
            let source = args
                .config
                .clone()
                .or_else(Config::default_path)
                .filter(|p| p.exists())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            eprintln!("{} {}", "Configuration from".bold(), source);
            println!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Read request text from a file or stdin
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
