//! Shared domain types.
//!
//! Output types are serializable so they can be exported to JSON/CSV and
//! consumed by downstream tooling (tables, plots, notebooks).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One model's standing within a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub aic: f64,
    /// `aic - min(aic)`; exactly `0.0` for the best model.
    pub delta_aic: f64,
    /// `exp(-0.5 * delta_aic)`; exactly `1.0` for the best model.
    pub likelihood: f64,
    /// Normalized Akaike weight.
    pub weight: f64,
}

/// Comparison rows in the same order as the input models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub(crate) fn new(rows: Vec<ComparisonRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// The first row (in input order) with the minimum AIC.
    pub fn best(&self) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.delta_aic == 0.0)
    }

    /// Rows sorted by ascending AIC. Ties keep input order.
    pub fn ranked(&self) -> Vec<&ComparisonRow> {
        let mut out: Vec<&ComparisonRow> = self.rows.iter().collect();
        out.sort_by(|a, b| a.aic.total_cmp(&b.aic));
        out
    }

    pub fn into_rows(self) -> Vec<ComparisonRow> {
        self.rows
    }
}

/// A single column of a dataset.
///
/// Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    /// Categorical column. `levels` are sorted; the first is the baseline.
    Factor {
        levels: Vec<String>,
        codes: Vec<Option<usize>>,
    },
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Factor { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Numeric(v) => v[row].is_none(),
            Column::Factor { codes, .. } => codes[row].is_none(),
        }
    }
}

/// Column-oriented table loaded from CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from named columns of equal length.
    pub fn new(named: Vec<(String, Column)>) -> Result<Self, String> {
        let n_rows = named.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(named.len());
        let mut columns = Vec::with_capacity(named.len());
        for (name, column) in named {
            if column.len() != n_rows {
                return Err(format!(
                    "Column '{name}' has {} rows, expected {n_rows}",
                    column.len()
                ));
            }
            if names.contains(&name) {
                return Err(format!("Duplicate column name '{name}'"));
            }
            names.push(name);
            columns.push(column);
        }
        Ok(Self {
            names,
            columns,
            n_rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }
}

/// A named formula to fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: String,
    pub formula: String,
}

impl ModelSpec {
    /// Parse `NAME=FORMULA`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let (name, formula) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected NAME=FORMULA, got '{s}'"))?;
        let name = name.trim();
        let formula = formula.trim();
        if name.is_empty() {
            return Err(format!("Missing model name in '{s}'"));
        }
        if formula.is_empty() {
            return Err(format!("Missing formula in '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            formula: formula.to_string(),
        })
    }
}

/// Output configuration for a run.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Decimal places in the terminal table.
    pub digits: usize,
    /// Display rows sorted by AIC instead of input order.
    pub ranked: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            digits: 4,
            ranked: false,
            export_csv: None,
            export_json: None,
        }
    }
}
