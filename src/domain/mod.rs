//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - comparison outputs (`ComparisonRow`, `ComparisonTable`)
//! - tabular input data (`Dataset`, `Column`)
//! - run configuration (`CompareConfig`, `ModelSpec`)

pub mod types;

pub use types::*;
