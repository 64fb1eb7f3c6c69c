//! Design matrix construction.
//!
//! Columns are laid out as: intercept (if any), then for each formula term the
//! product of its variables' column sets. A numeric variable contributes one
//! column. A factor contributes one 0/1 column per non-baseline level when its
//! margin (the term with that factor removed) is already spanned, and one
//! column per level otherwise. The intercept spans the empty margin; without
//! an intercept, the first full-coded factor main effect takes its place.
//!
//! Rows with a missing response or a missing value in any used predictor are
//! dropped before the matrix is built.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Column, Dataset};
use crate::error::AppError;
use crate::models::formula::Formula;

/// A response vector and design matrix ready for least squares.
#[derive(Debug, Clone)]
pub struct Design {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    /// One label per design column (`(Intercept)`, `x`, `f[b]`, `x:f[b]`, ...).
    pub labels: Vec<String>,
    /// Dataset rows used, in order.
    pub rows: Vec<usize>,
    pub dropped: usize,
}

/// A single generated column: label plus value per dataset row.
struct Generated {
    label: String,
    values: Vec<f64>,
}

pub fn build_design(dataset: &Dataset, formula: &Formula) -> Result<Design, AppError> {
    let response = lookup(dataset, &formula.response)?;
    let Column::Numeric(y_raw) = response else {
        return Err(AppError::new(
            2,
            format!("Response '{}' must be numeric.", formula.response),
        ));
    };

    let predictors = formula
        .predictors()
        .into_iter()
        .map(|name| lookup(dataset, name).map(|col| (name, col)))
        .collect::<Result<Vec<_>, _>>()?;

    let rows: Vec<usize> = (0..dataset.n_rows())
        .filter(|&i| y_raw[i].is_some() && predictors.iter().all(|(_, c)| !c.is_missing(i)))
        .collect();
    let dropped = dataset.n_rows() - rows.len();

    let mut generated: Vec<Generated> = Vec::new();
    if formula.intercept {
        generated.push(Generated {
            label: "(Intercept)".to_string(),
            values: vec![1.0; rows.len()],
        });
    }

    let mut constant_spanned = formula.intercept;
    for (t, term) in formula.terms.iter().enumerate() {
        let mut acc = vec![Generated {
            label: String::new(),
            values: vec![1.0; rows.len()],
        }];
        for var in &term.vars {
            let column = predictors
                .iter()
                .find(|(n, _)| *n == var.as_str())
                .map(|(_, c)| *c)
                .ok_or_else(|| AppError::new(2, format!("Unknown column '{var}'.")))?;
            let full = matches!(column, Column::Factor { .. }) && {
                let margin: Vec<&String> = term.vars.iter().filter(|v| *v != var).collect();
                if margin.is_empty() {
                    !constant_spanned
                } else {
                    !formula.terms[..t]
                        .iter()
                        .any(|earlier| same_vars(&earlier.vars, &margin))
                }
            };
            if full && term.vars.len() == 1 {
                constant_spanned = true;
            }
            let parts = variable_columns(var, column, &rows, full);
            acc = cross(&acc, &parts);
        }
        generated.extend(acc);
    }

    let n = rows.len();
    let p = generated.len();
    if n < p.max(1) {
        return Err(AppError::new(
            3,
            format!(
                "Formula '{formula}' needs at least {} complete rows, found {n}.",
                p.max(1)
            ),
        ));
    }

    let x = DMatrix::from_fn(n, p, |i, j| generated[j].values[i]);
    let y = DVector::from_iterator(n, rows.iter().map(|&i| y_raw[i].unwrap_or(f64::NAN)));
    let labels = generated.into_iter().map(|g| g.label).collect();

    Ok(Design {
        x,
        y,
        labels,
        rows,
        dropped,
    })
}

fn lookup<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column, AppError> {
    dataset.column(name).ok_or_else(|| {
        AppError::new(
            2,
            format!(
                "Unknown column '{name}'. Available: {}",
                dataset.names().join(", ")
            ),
        )
    })
}

fn same_vars(vars: &[String], margin: &[&String]) -> bool {
    vars.len() == margin.len() && margin.iter().all(|m| vars.contains(*m))
}

/// Columns for one variable. `full` keeps the baseline level of a factor.
fn variable_columns(name: &str, column: &Column, rows: &[usize], full: bool) -> Vec<Generated> {
    match column {
        Column::Numeric(values) => vec![Generated {
            label: name.to_string(),
            values: rows.iter().map(|&i| values[i].unwrap_or(f64::NAN)).collect(),
        }],
        Column::Factor { levels, codes } => levels
            .iter()
            .enumerate()
            .skip(usize::from(!full))
            .map(|(level_idx, level)| Generated {
                label: format!("{name}[{level}]"),
                values: rows
                    .iter()
                    .map(|&i| if codes[i] == Some(level_idx) { 1.0 } else { 0.0 })
                    .collect(),
            })
            .collect(),
    }
}

/// Elementwise products of every pair `(a, b)`; labels joined with `:`.
fn cross(left: &[Generated], right: &[Generated]) -> Vec<Generated> {
    let mut out = Vec::with_capacity(left.len() * right.len());
    for a in left {
        for b in right {
            let label = if a.label.is_empty() {
                b.label.clone()
            } else {
                format!("{}:{}", a.label, b.label)
            };
            let values = a.values.iter().zip(&b.values).map(|(u, v)| u * v).collect();
            out.push(Generated { label, values });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            (
                "y".to_string(),
                Column::Numeric(vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)]),
            ),
            (
                "x".to_string(),
                Column::Numeric(vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0), None]),
            ),
            (
                "g".to_string(),
                Column::Factor {
                    levels: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    codes: vec![Some(0), Some(1), Some(2), Some(2), Some(1)],
                },
            ),
        ])
        .unwrap()
    }

    #[test]
    fn numeric_and_factor_columns_with_listwise_deletion() {
        let f = Formula::parse("y ~ x + g").unwrap();
        let d = build_design(&dataset(), &f).unwrap();

        assert_eq!(d.labels, vec!["(Intercept)", "x", "g[b]", "g[c]"]);
        assert_eq!(d.rows, vec![0, 1, 3]);
        assert_eq!(d.dropped, 2);
        assert_eq!(d.x.nrows(), 3);
        assert_eq!(d.x.row(1).iter().copied().collect::<Vec<_>>(), vec![1.0, 20.0, 1.0, 0.0]);
        assert_eq!(d.x.row(2).iter().copied().collect::<Vec<_>>(), vec![1.0, 40.0, 0.0, 1.0]);
        assert_eq!(d.y.as_slice(), &[1.0, 2.0, 4.0]);
    }

    #[test]
    fn interaction_without_main_effect_codes_every_level() {
        let f = Formula::parse("y ~ x:g - 1").unwrap();
        let d = build_design(&dataset(), &f).unwrap();
        assert_eq!(d.labels, vec!["x:g[a]", "x:g[b]", "x:g[c]"]);
        assert_eq!(d.x.row(0).iter().copied().collect::<Vec<_>>(), vec![10.0, 0.0, 0.0]);
        assert_eq!(d.x.row(1).iter().copied().collect::<Vec<_>>(), vec![0.0, 20.0, 0.0]);
        assert_eq!(d.x.row(2).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 40.0]);
    }

    #[test]
    fn interaction_with_main_effect_drops_baseline() {
        let f = Formula::parse("y ~ x + x:g").unwrap();
        let d = build_design(&dataset(), &f).unwrap();
        assert_eq!(d.labels, vec!["(Intercept)", "x", "x:g[b]", "x:g[c]"]);
    }

    #[test]
    fn factor_without_intercept_codes_every_level() {
        let f = Formula::parse("y ~ g - 1").unwrap();
        let d = build_design(&dataset(), &f).unwrap();
        assert_eq!(d.labels, vec!["g[a]", "g[b]", "g[c]"]);
        assert_eq!(d.rows, vec![0, 1, 3, 4]);
        assert_eq!(d.x.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 0.0, 0.0]);
        assert_eq!(d.x.row(2).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 1.0]);
        assert_eq!(d.x.row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn only_first_factor_replaces_missing_intercept() {
        let data = Dataset::new(vec![
            ("y".to_string(), Column::Numeric(vec![Some(1.0), Some(2.0), Some(3.0)])),
            (
                "g".to_string(),
                Column::Factor {
                    levels: vec!["a".to_string(), "b".to_string()],
                    codes: vec![Some(0), Some(1), Some(1)],
                },
            ),
            (
                "h".to_string(),
                Column::Factor {
                    levels: vec!["u".to_string(), "v".to_string()],
                    codes: vec![Some(0), Some(0), Some(1)],
                },
            ),
        ])
        .unwrap();
        let f = Formula::parse("y ~ 0 + g + h").unwrap();
        let d = build_design(&data, &f).unwrap();
        assert_eq!(d.labels, vec!["g[a]", "g[b]", "h[v]"]);
    }

    #[test]
    fn unknown_column_is_invalid_input() {
        let f = Formula::parse("y ~ nope").unwrap();
        let err = build_design(&dataset(), &f).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn factor_response_is_rejected() {
        let f = Formula::parse("g ~ x").unwrap();
        assert_eq!(build_design(&dataset(), &f).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn too_few_rows_is_insufficient_data() {
        let f = Formula::parse("y ~ x*g").unwrap();
        let err = build_design(&dataset(), &f).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
