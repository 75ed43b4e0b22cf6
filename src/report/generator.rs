//! Report generation.
//!
//! Renders an aggregation report as plain text, Markdown, or JSON.

use crate::models::{Report, SourceSummary};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Rendering options shared by the text and Markdown formats.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Fixed decimals for the mean, or shortest round-trip form.
    pub precision: Option<u8>,
    /// Include the per-source breakdown.
    pub show_sources: bool,
}

impl From<&crate::config::ReportConfig> for RenderOptions {
    fn from(config: &crate::config::ReportConfig) -> Self {
        Self {
            precision: config.precision,
            show_sources: config.show_sources,
        }
    }
}

/// Format a float with optional fixed precision.
pub fn format_value(value: f64, precision: Option<u8>) -> String {
    match precision {
        Some(p) => format!("{:.*}", usize::from(p), value),
        None => value.to_string(),
    }
}

/// Generate a plain-text report.
pub fn generate_text_report(report: &Report, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "The average of the list is {}.\n",
        format_value(report.result.mean, options.precision)
    ));
    output.push_str(&format!(
        "The list contained {} numbers.\n",
        report.result.count
    ));

    if options.show_sources && report.sources.len() > 1 {
        output.push('\n');
        for source in &report.sources {
            output.push_str(&format!("  {}: {}\n", source.label, source.count));
        }
    }

    output
}

/// Generate the single-line report used when only the mean is wanted.
pub fn generate_mean_report(mean: f64, options: &RenderOptions) -> String {
    format!(
        "The average of the list is {}.\n",
        format_value(mean, options.precision)
    )
}

/// Generate a JSON document holding only the mean.
pub fn generate_json_mean_report(mean: f64) -> Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "mean": mean })).map_err(Into::into)
}

/// Generate a Markdown report.
pub fn generate_markdown_report(report: &Report, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str("# numavg Report\n\n");

    output.push_str("## Result\n\n");
    output.push_str("| Metric | Value |\n");
    output.push_str("|--------|-------|\n");
    output.push_str(&format!(
        "| Mean | {} |\n",
        format_value(report.result.mean, options.precision)
    ));
    output.push_str(&format!("| Count | {} |\n", report.result.count));
    output.push_str(&format!(
        "| Sum | {} |\n",
        format_value(report.sum, options.precision)
    ));
    output.push('\n');

    if options.show_sources {
        output.push_str(&generate_sources_section(&report.sources));
    }

    output.push_str("---\n\n");
    output.push_str(&format!(
        "*Generated {} from {} source(s) in {:.3}s*\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.metadata.sources_read,
        report.metadata.duration_seconds
    ));

    output
}

fn generate_sources_section(sources: &[SourceSummary]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Sources\n\n");
    for source in sources {
        section.push_str(&format!("- `{}`: {} numbers\n", source.label, source.count));
    }
    section.push('\n');

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AggregationResult;

    fn create_test_report() -> Report {
        Report::new(
            AggregationResult { mean: 5.5, count: 4 },
            vec![
                SourceSummary { label: "arguments".to_string(), count: 1 },
                SourceSummary { label: "scores.txt".to_string(), count: 3 },
            ],
            0.01,
        )
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.5, None), "5.5");
        assert_eq!(format_value(5.5, Some(2)), "5.50");
        assert_eq!(format_value(2.0 / 3.0, Some(3)), "0.667");
        assert_eq!(format_value(1.0, None), "1");
        assert_eq!(format_value(0.5, Some(u8::MAX)).len(), 2 + u8::MAX as usize);
    }

    #[test]
    fn test_generate_mean_reports() {
        let options = RenderOptions { precision: Some(2), show_sources: true };
        assert_eq!(
            generate_mean_report(5.5, &options),
            "The average of the list is 5.50.\n"
        );

        let json = generate_json_mean_report(5.5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mean"], 5.5);
        assert!(value.get("count").is_none());
    }

    #[test]
    fn test_generate_text_report() {
        let report = create_test_report();
        let options = RenderOptions { precision: None, show_sources: true };
        let text = generate_text_report(&report, &options);

        assert!(text.starts_with("The average of the list is 5.5.\n"));
        assert!(text.contains("The list contained 4 numbers."));
        assert!(text.contains("scores.txt: 3"));
    }

    #[test]
    fn test_text_report_hides_sources() {
        let report = create_test_report();
        let options = RenderOptions { precision: Some(1), show_sources: false };
        let text = generate_text_report(&report, &options);

        assert_eq!(
            text,
            "The average of the list is 5.5.\nThe list contained 4 numbers.\n"
        );
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let options = RenderOptions { precision: Some(2), show_sources: true };
        let markdown = generate_markdown_report(&report, &options);

        assert!(markdown.contains("# numavg Report"));
        assert!(markdown.contains("| Mean | 5.50 |"));
        assert!(markdown.contains("| Count | 4 |"));
        assert!(markdown.contains("| Sum | 22.00 |"));
        assert!(markdown.contains("## Sources"));
        assert!(markdown.contains("`scores.txt`: 3 numbers"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["mean"], 5.5);
        assert_eq!(value["result"]["count"], 4);
        assert_eq!(value["sum"], 22.0);
        assert_eq!(value["sources"][1]["label"], "scores.txt");
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        write_report("hello\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
