//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - parse each named formula
//! - fit all formulas against one dataset (parallel)
//! - compare the fits by AIC

pub mod runner;

pub use runner::*;
