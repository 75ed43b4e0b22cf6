//! Reading numbers from their sources.
//!
//! Sources are read one after another so the combined sequence keeps
//! the order the user gave them in.

use super::parser::{parse_numbers, parse_values};
use crate::models::SourceSummary;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// One origin of numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Values given directly on the command line.
    Inline(Vec<String>),
    /// A file on disk.
    File(PathBuf),
    /// Standard input, read to EOF.
    Stdin,
}

impl InputSource {
    /// Label used in reports and error messages.
    pub fn label(&self) -> String {
        match self {
            InputSource::Inline(_) => "arguments".to_string(),
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Numbers read from a single source.
#[derive(Debug, Clone)]
pub struct SourceNumbers {
    pub label: String,
    pub numbers: Vec<f64>,
}

impl SourceNumbers {
    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            label: self.label.clone(),
            count: self.numbers.len(),
        }
    }
}

/// Read and parse one source.
pub async fn read_source(source: &InputSource) -> Result<SourceNumbers> {
    let label = source.label();

    let numbers = match source {
        InputSource::Inline(values) => parse_values(values, &label)?,
        InputSource::File(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            parse_numbers(&content, &label)?
        }
        InputSource::Stdin => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read from stdin")?;
            parse_numbers(&content, &label)?
        }
    };

    debug!("Read {} numbers from {}", numbers.len(), label);
    Ok(SourceNumbers { label, numbers })
}

/// Read every source in order.
///
/// A progress bar is drawn when more than one file is involved and
/// `show_progress` is set.
pub async fn read_sources(sources: &[InputSource], show_progress: bool) -> Result<Vec<SourceNumbers>> {
    let file_count = sources
        .iter()
        .filter(|s| matches!(s, InputSource::File(_)))
        .count();

    let progress_bar = if show_progress && file_count > 1 {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(sources.len());
    for source in sources {
        if let Some(ref pb) = progress_bar {
            pb.set_message(source.label());
        }

        let read = read_source(source).await;

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
        results.push(read?);
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    let total: usize = results.iter().map(|r| r.numbers.len()).sum();
    info!("Read {} numbers from {} sources", total, results.len());

    Ok(results)
}
