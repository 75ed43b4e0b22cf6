//! Arithmetic mean over a sequence of numbers.
//!
//! The aggregator makes a single pass over its input, summing every element
//! in sequence order and counting elements as it goes. An empty sequence is
//! an error rather than a silent zero or NaN.

use crate::models::{AggregationResult, AsF64};
use thiserror::Error;

/// Aggregation error types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    #[error("cannot average an empty sequence")]
    EmptySequence,
}

/// Compute the mean of `values` together with the number of elements consumed.
///
/// Division is always floating-point, so `[1, 2]` averages to `1.5`.
pub fn compute_average<I>(values: I) -> Result<AggregationResult, AggregateError>
where
    I: IntoIterator,
    I::Item: AsF64,
{
    let mut count = 0usize;
    let mut total = 0.0f64;

    for value in values {
        count += 1;
        total += value.as_f64();
    }

    if count == 0 {
        return Err(AggregateError::EmptySequence);
    }

    Ok(AggregationResult {
        mean: total / count as f64,
        count,
    })
}

/// Compute only the mean of `values`.
pub fn compute_mean<I>(values: I) -> Result<f64, AggregateError>
where
    I: IntoIterator,
    I::Item: AsF64,
{
    compute_average(values).map(|r| r.mean)
}
