//! Fit several named formulas against one dataset and compare them.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::compare::{compare, NamedModels};
use crate::domain::{ComparisonTable, Dataset, ModelSpec};
use crate::error::AppError;
use crate::models::{fit_ols, Formula, OlsFit};

/// Output of fitting + comparison.
#[derive(Debug, Clone)]
pub struct FitComparison {
    /// Fits in the order the specs were given.
    pub fits: NamedModels<OlsFit>,
    pub table: ComparisonTable,
}

/// Fit every spec. Results keep the input order.
///
/// Names must be unique; the first formula or fitting error aborts the run.
pub fn fit_models(dataset: &Dataset, specs: &[ModelSpec]) -> Result<NamedModels<OlsFit>, AppError> {
    if specs.is_empty() {
        return Err(AppError::new(2, "No models to fit; pass at least one --model."));
    }

    let mut seen = HashSet::new();
    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(AppError::new(
                2,
                format!("Duplicate model name '{}'.", spec.name),
            ));
        }
    }

    // Parse up front so syntax errors surface before any fitting work.
    let formulas = specs
        .iter()
        .map(|spec| Formula::parse(&spec.formula))
        .collect::<Result<Vec<_>, _>>()?;

    let fits = specs
        .par_iter()
        .zip(formulas.par_iter())
        .map(|(spec, formula)| {
            let fit = fit_ols(dataset, formula).map_err(|e| {
                AppError::new(e.exit_code(), format!("Model '{}': {e}", spec.name))
            })?;
            debug!(
                model = %spec.name,
                n_obs = fit.n_obs,
                rank = fit.rank,
                rss = fit.rss,
                "fitted model"
            );
            Ok((spec.name.clone(), fit))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    info!(n_models = fits.len(), "fitted all models");
    Ok(fits.into_iter().collect())
}

/// Fit every spec and compare the fits by AIC.
pub fn fit_and_compare(dataset: &Dataset, specs: &[ModelSpec]) -> Result<FitComparison, AppError> {
    let fits = fit_models(dataset, specs)?;
    let table = compare(&fits)?;
    Ok(FitComparison { fits, table })
}
