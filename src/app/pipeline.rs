//! Shared run logic behind the CLI subcommands.
//!
//! Each function returns everything the front-end needs to print or export;
//! nothing here writes to stdout.

use std::path::Path;

use tracing::{info, warn};

use crate::compare::{compare, NamedModels};
use crate::domain::{ComparisonTable, ModelSpec};
use crate::error::AppError;
use crate::fit::{fit_and_compare, FitComparison};
use crate::io::{load_aic_table, load_dataset};

/// Computed outputs of `aicw compare`.
#[derive(Debug, Clone)]
pub struct CompareOutput {
    pub table: ComparisonTable,
}

/// Computed outputs of `aicw fit`.
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub comparison: FitComparison,
    /// Data rows seen in the CSV, including skipped ones.
    pub rows_read: usize,
    /// Rows the CSV reader could not parse.
    pub rows_skipped: usize,
}

/// Compare inline `NAME=VALUE` pairs followed by any rows from `input`.
pub fn run_compare(inline: &[(String, f64)], input: Option<&Path>) -> Result<CompareOutput, AppError> {
    let mut models: NamedModels<f64> = inline.iter().cloned().collect();

    if let Some(path) = input {
        for (name, aic) in load_aic_table(path)? {
            models.push(name, aic);
        }
    }

    let table = compare(&models)?;
    info!(n_models = table.len(), "compared models");
    Ok(CompareOutput { table })
}

/// Load `data`, fit every spec, and compare.
pub fn run_fit(data: &Path, specs: &[ModelSpec]) -> Result<FitOutput, AppError> {
    let loaded = load_dataset(data)?;
    for err in &loaded.row_errors {
        warn!(line = err.line, "{}", err.message);
    }

    let comparison = fit_and_compare(&loaded.dataset, specs)?;
    for (name, fit) in comparison.fits.iter() {
        if fit.n_dropped > 0 {
            info!(model = name, dropped = fit.n_dropped, "rows with missing values were dropped");
        }
    }

    Ok(FitOutput {
        comparison,
        rows_read: loaded.rows_read,
        rows_skipped: loaded.row_errors.len(),
    })
}
