//! Export comparison tables to CSV and JSON.
//!
//! The CSV is meant for spreadsheets; the JSON carries the same rows plus the
//! name of the best model for downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{ComparisonRow, ComparisonTable};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ComparisonFile<'a> {
    best: Option<&'a str>,
    rows: &'a [ComparisonRow],
}

/// Write comparison rows to a CSV file.
pub fn write_comparison_csv(path: &Path, table: &ComparisonTable) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "name,aic,delta_aic,likelihood,weight")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in table.rows() {
        writeln!(
            file,
            "{},{},{},{},{}",
            csv_field(&r.name),
            r.aic,
            r.delta_aic,
            r.likelihood,
            r.weight
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the comparison as pretty JSON.
pub fn write_comparison_json(path: &Path, table: &ComparisonTable) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;

    let doc = ComparisonFile {
        best: table.best().map(|r| r.name.as_str()),
        rows: table.rows(),
    };
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare, NamedModels};

    fn table() -> ComparisonTable {
        let models: NamedModels<f64> = vec![("a,b", 10.0), ("c", 12.0)].into_iter().collect();
        compare(&models).unwrap()
    }

    #[test]
    fn csv_export_quotes_names_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmp.csv");
        write_comparison_csv(&path, &table()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,aic,delta_aic,likelihood,weight");
        assert!(lines[1].starts_with("\"a,b\",10,0,1,"));
        assert!(lines[2].starts_with("c,12,2,"));
    }

    #[test]
    fn json_export_names_best_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmp.json");
        write_comparison_json(&path, &table()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["best"], "a,b");
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["rows"][1]["delta_aic"], 2.0);

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["best", "rows"]);
    }

    #[test]
    fn csv_fields_with_line_breaks_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a\rb"), "\"a\rb\"");
        assert_eq!(csv_field("a\nb"), "\"a\nb\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
