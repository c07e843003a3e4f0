//! Command-line argument parsing for biorisk
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// biorisk - Estimate disease risk from a blood biomarker panel
#[derive(Parser, Debug)]
#[command(name = "biorisk")]
#[command(version)]
#[command(about = "Estimate disease risk from a blood biomarker panel", long_about = None)]
pub struct Args {
    /// Model artifact (overrides model.artifact_path)
    #[arg(short, long, global = true)]
    pub model: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (defaults to `predict` reading stdin)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Evaluate one panel (JSON object)
    Predict {
        /// Read the panel from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Evaluate many panels (JSON array or JSON Lines)
    Batch {
        /// Read panels from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the active reference range table
    Ranges,

    /// Display current configuration
    Config,
}

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON on stdout
    Json,

    /// Coloured human-readable summary
    Pretty,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// Log filter directive for this verbosity; `Normal` defers to config
    pub fn filter<'a>(&self, configured: &'a str) -> &'a str {
        match self {
            Self::Quiet => "error",
            Self::Normal => configured,
            Self::Verbose => "info",
            Self::VeryVerbose => "debug",
        }
    }
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Effective command
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Predict { input: None })
    }
}
