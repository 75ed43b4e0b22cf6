//! numavg - average numbers from the command line
//!
//! A CLI tool that reads numbers from arguments, files, directories
//! and stdin, and reports their arithmetic mean and count.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input, unreadable file, bad config, etc.)
//!   2 - No numbers were read, so there is no mean

mod analysis;
mod cli;
mod config;
mod input;
mod models;
mod report;
mod scanner;

use analysis::AggregateError;
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use input::InputSource;
use models::{Report, SourceSummary};
use report::RenderOptions;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so config can enable verbose output
    let (mut config, config_note) = load_config(&args);
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("numavg v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_note {
        ConfigNote::Loaded(path) => info!("Loaded config from {}", path),
        ConfigNote::Defaults => debug!("No config file found, using defaults"),
        ConfigNote::Invalid(e) => warn!("Failed to load config, using defaults: {:#}", e),
    }

    match run(&args, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            // One user-facing line; the debug chain only shows with --verbose.
            debug!("numavg failed: {:?}", e);
            eprintln!("{}", failure_message(&e));
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Handle --init-config: generate a default .numavg.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report on stdout can be piped cleanly.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Outcome of config discovery, logged once logging is up.
enum ConfigNote {
    Loaded(String),
    Defaults,
    Invalid(anyhow::Error),
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` that fails to load is fatal; a broken default
/// file only produces a warning.
fn load_config(args: &Args) -> (Config, ConfigNote) {
    if let Some(ref config_path) = args.config {
        return match Config::load(config_path) {
            Ok(config) => (config, ConfigNote::Loaded(config_path.display().to_string())),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        };
    }

    match Config::load_default() {
        Ok(Some(config)) => (config, ConfigNote::Loaded(CONFIG_FILE_NAME.to_string())),
        Ok(None) => (Config::default(), ConfigNote::Defaults),
        Err(e) => (Config::default(), ConfigNote::Invalid(e)),
    }
}

/// The single line printed to stderr when a run fails.
fn failure_message(error: &anyhow::Error) -> String {
    format!("Error: {:#}", error)
}

/// Map an error to the process exit code.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<AggregateError>() {
        Some(AggregateError::EmptySequence) => 2,
        None => 1,
    }
}

/// Expand CLI arguments into an ordered list of sources.
fn collect_sources(args: &Args, config: &Config) -> Result<Vec<InputSource>> {
    let mut sources = Vec::new();

    if !args.values.is_empty() {
        sources.push(InputSource::Inline(args.values.clone()));
    }

    sources.extend(args.files.iter().cloned().map(InputSource::File));

    let scan_config = scanner::ScanConfig::from(&config.input);
    for dir in &args.dirs {
        let file_scanner = scanner::FileScanner::new(dir.clone(), scan_config.clone());
        let files = file_scanner
            .scan()
            .with_context(|| format!("Failed to scan directory: {}", dir.display()))?;

        if files.is_empty() {
            warn!("No data files found in {}", dir.display());
        } else {
            info!("Found {} data files in {}", files.len(), dir.display());
        }
        for file in &files {
            debug!("  {} ({} bytes)", file.path.display(), file.size);
        }
        sources.extend(files.into_iter().map(|f| InputSource::File(f.path)));
    }

    if args.stdin {
        sources.push(InputSource::Stdin);
    }

    Ok(sources)
}

/// Read every source, aggregate, and emit the report.
async fn run(args: &Args, config: &Config) -> Result<()> {
    let start_time = Instant::now();

    let sources = collect_sources(args, config)?;
    debug!("Reading {} sources", sources.len());

    let read = input::read_sources(&sources, !args.quiet).await?;
    let numbers = read.iter().flat_map(|r| r.numbers.iter());
    let options = RenderOptions::from(&config.report);

    if args.mean_only {
        let mean = analysis::compute_mean(numbers)?;
        info!("Mean {}", mean);

        let output = match config.general.format {
            OutputFormat::Json => {
                let mut json = report::generate_json_mean_report(mean)?;
                json.push('\n');
                json
            }
            OutputFormat::Text | OutputFormat::Markdown => {
                report::generate_mean_report(mean, &options)
            }
        };
        return emit(&output, config);
    }

    let summaries: Vec<SourceSummary> = read.iter().map(|r| r.summary()).collect();
    let result = analysis::compute_average(numbers)?;
    info!("Mean {} over {} numbers", result.mean, result.count);

    let report = Report::new(result, summaries, start_time.elapsed().as_secs_f64());

    let output = match config.general.format {
        OutputFormat::Text => report::generate_text_report(&report, &options),
        OutputFormat::Markdown => report::generate_markdown_report(&report, &options),
        OutputFormat::Json => {
            let mut json = report::generate_json_report(&report)?;
            json.push('\n');
            json
        }
    };

    emit(&output, config)
}

/// Write rendered output to the configured file, or stdout.
fn emit(output: &str, config: &Config) -> Result<()> {
    match config.general.output {
        Some(ref path) => {
            report::write_report(output, path)?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;

    #[test]
    fn test_exit_code_for_empty_sequence() {
        let err: anyhow::Error = AggregateError::EmptySequence.into();
        assert_eq!(exit_code_for(&err), 2);

        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_failure_message_is_single_line() {
        let err = anyhow::anyhow!("missing.txt not found").context("Failed to read input file");
        let message = failure_message(&err);

        assert_eq!(message, "Error: Failed to read input file: missing.txt not found");
        assert_eq!(message.lines().count(), 1);
    }

    #[test]
    fn test_collect_sources_order() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "2").unwrap();
        std::fs::write(dir.path().join("a.txt"), "1").unwrap();

        let mut args = make_args();
        args.files = vec!["explicit.txt".into()];
        args.dirs = vec![dir.path().to_path_buf()];
        args.stdin = true;

        let sources = collect_sources(&args, &Config::default()).unwrap();
        assert_eq!(sources.len(), 5);
        assert_eq!(sources[0], InputSource::Inline(vec!["1".to_string()]));
        assert_eq!(sources[1], InputSource::File("explicit.txt".into()));
        assert_eq!(sources[2], InputSource::File(dir.path().join("a.txt")));
        assert_eq!(sources[3], InputSource::File(dir.path().join("b.txt")));
        assert_eq!(sources[4], InputSource::Stdin);
    }

    #[tokio::test]
    async fn test_run_empty_input_is_empty_sequence() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "# nothing here\n").unwrap();

        let mut args = make_args();
        args.values.clear();
        args.files = vec![path];
        args.quiet = true;

        let err = run(&args, &Config::default()).await.unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
    }

    #[tokio::test]
    async fn test_run_writes_json_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("report.json");

        let mut args = make_args();
        args.values = vec!["5.0".into(), "7.0".into(), "8.0".into(), "2.0".into()];
        args.quiet = true;

        let mut config = Config::default();
        config.general.format = OutputFormat::Json;
        config.general.output = Some(out.clone());

        run(&args, &config).await.unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["result"]["mean"], 5.5);
        assert_eq!(value["result"]["count"], 4);
    }

    #[tokio::test]
    async fn test_run_mean_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("mean.txt");

        let mut args = make_args();
        args.values = vec!["5.0,7.0,8.0,2.0".into()];
        args.mean_only = true;
        args.quiet = true;

        let mut config = Config::default();
        config.general.output = Some(out.clone());

        run(&args, &config).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "The average of the list is 5.5.\n"
        );

        config.general.format = OutputFormat::Json;
        run(&args, &config).await.unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["mean"], 5.5);
    }

    #[tokio::test]
    async fn test_run_mean_only_empty_input() {
        let mut args = make_args();
        args.values = vec!["# nothing".into()];
        args.mean_only = true;
        args.quiet = true;

        let err = run(&args, &Config::default()).await.unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
    }
}
