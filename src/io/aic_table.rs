//! Read precomputed AIC values from CSV.
//!
//! Expected columns (case-insensitive, any order, extra columns ignored):
//! `name`, `aic`. This is how models fitted elsewhere (GLMs, mixed models)
//! enter the comparison.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::compare::NamedModels;
use crate::error::AppError;

pub fn load_aic_table(path: &Path) -> Result<NamedModels<f64>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open AIC table '{}': {e}", path.display()))
    })?;
    read_aic_table(file)
}

pub fn read_aic_table<R: Read>(reader: R) -> Result<NamedModels<f64>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header_map: HashMap<String, usize> = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read AIC table headers: {e}")))?
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim_start_matches('\u{feff}').to_ascii_lowercase();
            (name, idx)
        })
        .collect();

    let name_idx = *header_map
        .get("name")
        .ok_or_else(|| AppError::new(2, "Missing required column: `name`"))?;
    let aic_idx = *header_map
        .get("aic")
        .ok_or_else(|| AppError::new(2, "Missing required column: `aic`"))?;

    let mut models = NamedModels::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record =
            result.map_err(|e| AppError::new(2, format!("AIC table line {line}: {e}")))?;

        let name = record.get(name_idx).unwrap_or("");
        if name.is_empty() {
            return Err(AppError::new(2, format!("AIC table line {line}: empty `name`.")));
        }
        let raw = record.get(aic_idx).unwrap_or("");
        let aic: f64 = raw.parse().map_err(|_| {
            AppError::new(
                2,
                format!("AIC table line {line}: invalid `aic` value '{raw}' for '{name}'."),
            )
        })?;
        models.push(name, aic);
    }

    Ok(models)
}
