//! Data models for numavg.
//!
//! This module contains the values that flow between the parser,
//! the aggregator and the report generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversion of a numeric element into the `f64` domain the mean is computed in.
pub trait AsF64 {
    fn as_f64(&self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($t:ty),*) => {
        $(
            impl AsF64 for $t {
                fn as_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_as_f64!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: AsF64 + ?Sized> AsF64 for &T {
    fn as_f64(&self) -> f64 {
        (**self).as_f64()
    }
}

/// The (mean, count) pair produced by one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Arithmetic mean of the sequence.
    pub mean: f64,
    /// Number of elements consumed.
    pub count: usize,
}

impl AggregationResult {
    /// Total of the sequence, recovered from mean and count.
    pub fn sum(&self) -> f64 {
        self.mean * self.count as f64
    }
}

/// Where a group of numbers came from, and how many it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Human-readable label (`arguments`, a file path, or `stdin`).
    pub label: String,
    /// Numbers read from this source.
    pub count: usize,
}

/// Metadata about a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Number of sources read.
    pub sources_read: usize,
    /// Wall time spent reading and aggregating, in seconds.
    pub duration_seconds: f64,
}

/// The complete aggregation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Mean and count.
    pub result: AggregationResult,
    /// Sum of all values.
    pub sum: f64,
    /// Per-source breakdown, in read order.
    pub sources: Vec<SourceSummary>,
}

impl Report {
    /// Builds a report around an aggregation result.
    pub fn new(result: AggregationResult, sources: Vec<SourceSummary>, duration_seconds: f64) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                sources_read: sources.len(),
                duration_seconds,
            },
            result,
            sum: result.sum(),
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64() {
        assert_eq!(3i64.as_f64(), 3.0);
        assert_eq!(2.5f32.as_f64(), 2.5);
        assert_eq!((&7u8).as_f64(), 7.0);
        assert_eq!((-4i16).as_f64(), -4.0);
    }

    #[test]
    fn test_result_sum() {
        let result = AggregationResult { mean: 5.5, count: 4 };
        assert_eq!(result.sum(), 22.0);
    }

    #[test]
    fn test_report_new() {
        let result = AggregationResult { mean: 2.0, count: 3 };
        let sources = vec![
            SourceSummary { label: "arguments".to_string(), count: 2 },
            SourceSummary { label: "stdin".to_string(), count: 1 },
        ];

        let report = Report::new(result, sources, 0.25);
        assert_eq!(report.metadata.sources_read, 2);
        assert_eq!(report.sum, 6.0);
        assert_eq!(report.result.count, 3);
    }
}
