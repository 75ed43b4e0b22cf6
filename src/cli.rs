//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::MAX_PRECISION;
use clap::error::ErrorKind;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// numavg - average numbers from arguments, files, directories or stdin
///
/// Prints the arithmetic mean of every number it reads, and how many
/// numbers went into it. Empty input is an error, never a zero.
///
/// Examples:
///   numavg 5.0 7.0 8.0 2.0
///   numavg -f scores.txt -f more.csv
///   numavg -d ./measurements --format json
///   seq 1 100 | numavg --stdin --precision 2
///   numavg --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Numbers to average
    ///
    /// Each value may hold several numbers separated by commas or semicolons.
    #[arg(value_name = "VALUES", allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Read numbers from a file (repeatable)
    #[arg(short, long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Read numbers from every data file under a directory (repeatable)
    #[arg(short, long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Read numbers from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Output format (text, markdown, json)
    ///
    /// Can also be set via NUMAVG_FORMAT env var or .numavg.toml config.
    #[arg(long, value_name = "FORMAT", env = "NUMAVG_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of decimals to print for the mean (0-64)
    #[arg(
        short,
        long,
        value_name = "DIGITS",
        value_parser = clap::value_parser!(u8).range(0..=MAX_PRECISION as i64)
    )]
    pub precision: Option<u8>,

    /// Print only the mean, without the count or sources
    #[arg(long)]
    pub mean_only: bool,

    /// Omit the per-source breakdown from the report
    #[arg(long)]
    pub no_sources: bool,

    /// File extensions picked up by --dir (comma-separated)
    ///
    /// Example: --extensions txt,csv
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Maximum number of files taken from each --dir
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .numavg.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no progress bar)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .numavg.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain sentences (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// Usage errors exit with 1, keeping exit code 2 for empty input.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => {
                let code = usage_exit_code(e.kind());
                let _ = e.print();
                std::process::exit(code);
            }
        }
    }

    /// Returns true if any input source was given.
    pub fn has_input(&self) -> bool {
        !self.values.is_empty() || !self.files.is_empty() || !self.dirs.is_empty() || self.stdin
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if !self.has_input() {
            return Err(
                "No input given: pass VALUES, --file, --dir or --stdin".to_string(),
            );
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(0) = self.max_files {
            return Err("Max files must be at least 1".to_string());
        }

        for dir in &self.dirs {
            if !dir.exists() {
                return Err(format!("Directory does not exist: {}", dir.display()));
            }
            if !dir.is_dir() {
                return Err(format!("Path is not a directory: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Exit code for a clap parse outcome.
pub fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
