#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// recursive filter coefficient types and the recurrence trait.
pub mod recurrence;

/// strictly sequential reference scans.
pub mod sequential;

/// blocked parallel filtering pipeline.
pub mod pipeline;

/// image transposition between the row and column directions.
pub mod transpose;

/// buffer comparison metrics for validating results.
pub mod metrics;

/// execution strategy control for the parallel phases.
pub mod parallel;

/// Error types for the filtering operations.
pub mod error;

mod blocked;

pub use crate::error::FilterError;
