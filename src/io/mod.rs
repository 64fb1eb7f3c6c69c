//! Input/output helpers.
//!
//! - CSV dataset ingest (`dataset`)
//! - precomputed AIC tables (`aic_table`)
//! - comparison exports (CSV/JSON) (`export`)

pub mod aic_table;
pub mod dataset;
pub mod export;

pub use aic_table::*;
pub use dataset::*;
pub use export::*;
