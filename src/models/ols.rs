//! Gaussian linear models fitted by ordinary least squares.
//!
//! Information criteria use the usual conventions for normal linear models:
//!
//! - `logL = -n/2 * (ln(2π) + 1 + ln(RSS/n))`
//! - `df = rank + 1` (the residual variance counts as a parameter)
//! - `AIC = -2 logL + 2 df`

use std::f64::consts::PI;

use serde::Serialize;

use crate::compare::AicSource;
use crate::domain::Dataset;
use crate::error::AppError;
use crate::math::solve_least_squares;
use crate::models::design::build_design;
use crate::models::formula::Formula;

#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
}

/// A fitted linear model.
#[derive(Debug, Clone, Serialize)]
pub struct OlsFit {
    pub formula: String,
    pub coefficients: Vec<Coefficient>,
    pub n_obs: usize,
    /// Rows dropped because of missing values.
    pub n_dropped: usize,
    pub rank: usize,
    pub rss: f64,
    pub r_squared: f64,
    pub log_likelihood: f64,
}

impl OlsFit {
    /// Parameters counted by AIC: coefficients actually estimated plus sigma.
    pub fn df(&self) -> usize {
        self.rank + 1
    }

    pub fn sigma(&self) -> f64 {
        let resid_df = self.n_obs.saturating_sub(self.rank);
        if resid_df == 0 {
            return f64::NAN;
        }
        (self.rss / resid_df as f64).sqrt()
    }

    pub fn coefficient(&self, term: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|c| c.term == term)
            .map(|c| c.estimate)
    }
}

impl AicSource for OlsFit {
    fn aic(&self) -> Option<f64> {
        let aic = -2.0 * self.log_likelihood + 2.0 * self.df() as f64;
        aic.is_finite().then_some(aic)
    }
}

/// Fit `formula` to `dataset`.
pub fn fit_ols(dataset: &Dataset, formula: &Formula) -> Result<OlsFit, AppError> {
    let design = build_design(dataset, formula)?;
    let n = design.y.len();

    let sol = solve_least_squares(&design.x, &design.y).ok_or_else(|| {
        AppError::new(
            4,
            format!("Least squares failed for '{formula}' (design matrix is degenerate)."),
        )
    })?;

    let tss = if formula.intercept {
        let mean = design.y.mean();
        design.y.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
    } else {
        design.y.norm_squared()
    };
    let r_squared = if tss > 0.0 { 1.0 - sol.rss / tss } else { f64::NAN };

    let coefficients = design
        .labels
        .into_iter()
        .zip(sol.beta.iter())
        .map(|(term, &estimate)| Coefficient { term, estimate })
        .collect();

    Ok(OlsFit {
        formula: formula.to_string(),
        coefficients,
        n_obs: n,
        n_dropped: design.dropped,
        rank: sol.rank,
        rss: sol.rss,
        r_squared,
        log_likelihood: gaussian_log_likelihood(n, sol.rss),
    })
}

/// Maximized normal log-likelihood given the residual sum of squares.
///
/// A perfect fit (`rss == 0`) gives `+inf`.
pub fn gaussian_log_likelihood(n: usize, rss: f64) -> f64 {
    if n == 0 {
        return f64::NAN;
    }
    let n_f = n as f64;
    -0.5 * n_f * ((2.0 * PI).ln() + 1.0 + (rss / n_f).ln())
}
