//! `aic-compare` library crate.
//!
//! The binary (`aicw`) is a thin wrapper around this library so that:
//!
//! - the comparison is usable from other Rust code without the CLI
//! - core logic is testable without spawning processes
//!
//! ```
//! use aic_compare::compare::{compare, NamedModels};
//!
//! let models: NamedModels<f64> = vec![("pop", 13553.08), ("gdp", 12850.41), ("year", 13201.73)]
//!     .into_iter()
//!     .collect();
//! let table = compare(&models).unwrap();
//! assert_eq!(table.best().map(|r| r.name.as_str()), Some("gdp"));
//! ```

pub mod app;
pub mod cli;
pub mod compare;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use compare::{AicSource, InformationFit, NamedModels, aic_weights, compare};
pub use domain::{ComparisonRow, ComparisonTable};
pub use error::CompareError;
