//! AIC comparison: delta AIC, relative likelihood and Akaike weights.
//!
//! For AIC values `aic_i`:
//!
//! - `delta_i = aic_i - min(aic)`
//! - `likelihood_i = exp(-0.5 * delta_i)`
//! - `weight_i = likelihood_i / Σ likelihood_j`
//!
//! Large deltas underflow the likelihood to exactly `0.0`. That is the value
//! the formula produces in double precision and is kept as-is.

use std::collections::HashSet;

use tracing::debug;

use crate::compare::source::{AicSource, NamedModels};
use crate::domain::{ComparisonRow, ComparisonTable};
use crate::error::CompareError;

/// Per-model output of the weight kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AicWeight {
    pub delta_aic: f64,
    pub likelihood: f64,
    pub weight: f64,
}

/// Compare named models by AIC.
///
/// Rows come back in the input order. Fails if the collection is empty, has a
/// duplicate name, or contains a model without a finite AIC.
pub fn compare<M: AicSource>(models: &NamedModels<M>) -> Result<ComparisonTable, CompareError> {
    if models.is_empty() {
        return Err(CompareError::Empty);
    }

    let mut seen = HashSet::with_capacity(models.len());
    let mut names = Vec::with_capacity(models.len());
    let mut aics = Vec::with_capacity(models.len());

    for (name, model) in models.iter() {
        if !seen.insert(name) {
            return Err(CompareError::DuplicateName(name.to_string()));
        }
        let aic = model
            .aic()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CompareError::AicUnavailable {
                name: name.to_string(),
            })?;
        names.push(name);
        aics.push(aic);
    }

    let rows = names
        .into_iter()
        .zip(aics.iter())
        .zip(aic_weights(&aics))
        .map(|((name, &aic), w)| ComparisonRow {
            name: name.to_string(),
            aic,
            delta_aic: w.delta_aic,
            likelihood: w.likelihood,
            weight: w.weight,
        })
        .collect::<Vec<_>>();

    debug!(n_models = rows.len(), "computed AIC comparison");
    Ok(ComparisonTable::new(rows))
}

/// Weight kernel over raw AIC values.
///
/// Expects a non-empty slice of finite values; `compare` validates before
/// calling this. An empty slice yields an empty vector.
pub fn aic_weights(aics: &[f64]) -> Vec<AicWeight> {
    let min_aic = aics.iter().copied().fold(f64::INFINITY, f64::min);

    let deltas: Vec<f64> = aics.iter().map(|&a| a - min_aic).collect();
    let likelihoods: Vec<f64> = deltas.iter().map(|&d| (-0.5 * d).exp()).collect();
    // The best model contributes exactly 1.0, so the sum is never zero.
    let total: f64 = likelihoods.iter().sum();

    deltas
        .into_iter()
        .zip(likelihoods)
        .map(|(delta_aic, likelihood)| AicWeight {
            delta_aic,
            likelihood,
            weight: likelihood / total,
        })
        .collect()
}
