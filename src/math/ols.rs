//! Least squares via SVD.
//!
//! Formula-built design matrices are tall (many more rows than columns) and may
//! be rank deficient when a user includes collinear terms, so we solve with SVD
//! rather than QR. Rank deficiency yields the minimum-norm solution and a
//! reduced rank, which feeds into the AIC degrees of freedom.

use nalgebra::{DMatrix, DVector};

/// Relative singular-value cutoffs, tried in order.
const TOLERANCES: [f64; 3] = [1e-10, 1e-8, 1e-6];

/// Solution of `min ||y - Xβ||²`.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    /// Number of singular values above the accepted cutoff.
    pub rank: usize,
    pub rss: f64,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no tolerance yields a finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<LeastSquares> {
    if x.nrows() != y.len() || x.ncols() == 0 {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let sv_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    if !(sv_max.is_finite() && sv_max > 0.0) {
        return None;
    }

    for rel in TOLERANCES {
        let eps = rel * sv_max;
        let Ok(beta) = svd.solve(y, eps) else {
            continue;
        };
        if !beta.iter().all(|v| v.is_finite()) {
            continue;
        }
        let rank = svd.singular_values.iter().filter(|&&s| s > eps).count();
        let rss = (y - x * &beta).norm_squared();
        return Some(LeastSquares { beta, rank, rss });
    }

    None
}
