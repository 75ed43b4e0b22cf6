//! Numeric aggregation.
//!
//! This module holds the pure averaging logic; everything else in the
//! crate either feeds it numbers or renders its result.

pub mod aggregator;

pub use aggregator::*;
