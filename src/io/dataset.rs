//! CSV dataset ingest.
//!
//! Turns a CSV with a header row into a column-oriented `Dataset`:
//!
//! - empty cells, `NA` and non-finite numbers are missing values
//! - a column where every present cell parses as a number is numeric
//! - any other column is a factor with sorted levels (first level = baseline)
//! - rows the CSV parser rejects are skipped and reported

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{Column, Dataset};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

pub fn load_dataset(path: &Path) -> Result<LoadedDataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    let loaded = read_dataset(file)?;
    debug!(
        path = %path.display(),
        rows = loaded.dataset.n_rows(),
        columns = loaded.dataset.names().len(),
        "loaded dataset"
    );
    Ok(loaded)
}

pub fn read_dataset<R: Read>(reader: R) -> Result<LoadedDataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(AppError::new(2, "CSV has no header columns."));
    }
    if let Some(idx) = headers.iter().position(String::is_empty) {
        return Err(AppError::new(2, format!("CSV header column {} is empty.", idx + 1)));
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        match result {
            Ok(record) => push_record(&record, &mut cells),
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable CSV row");
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
            }
        }
    }

    let named = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| (name, build_column(raw)))
        .collect();
    let dataset = Dataset::new(named).map_err(|e| AppError::new(2, e))?;

    if dataset.n_rows() == 0 {
        return Err(AppError::new(3, "CSV contains no data rows."));
    }

    Ok(LoadedDataset {
        dataset,
        row_errors,
        rows_read,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Append one record; short rows are padded with missing cells.
fn push_record(record: &StringRecord, cells: &mut [Vec<Option<String>>]) {
    for (col, out) in cells.iter_mut().enumerate() {
        let cell = record
            .get(col)
            .filter(|s| !is_missing_token(s))
            .map(str::to_string);
        out.push(cell);
    }
}

fn is_missing_token(s: &str) -> bool {
    s.is_empty() || s == "NA"
}

fn build_column(raw: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            // Non-finite numbers (`NaN`, `inf`) count as missing.
            Some(s) => s.parse::<f64>().ok().map(|v| v.is_finite().then_some(v)),
        })
        .collect();

    if let Some(values) = parsed {
        return Column::Numeric(values);
    }

    let mut levels: Vec<String> = raw.iter().flatten().cloned().collect();
    levels.sort();
    levels.dedup();

    let codes = raw
        .iter()
        .map(|cell| {
            cell.as_ref()
                .and_then(|s| levels.binary_search(s).ok())
        })
        .collect();

    Column::Factor { levels, codes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_numeric_and_factor_columns() {
        let csv = "\u{feff}country,continent,year,lifeExp\n\
                   A,Europe,1952,60.5\n\
                   B,Asia,1957,NA\n\
                   C,Africa,,45.2\n\
                   D,Asia,1967,50.0\n";
        let loaded = read_dataset(csv.as_bytes()).unwrap();
        let data = &loaded.dataset;

        assert_eq!(data.names(), &["country", "continent", "year", "lifeExp"]);
        assert_eq!(data.n_rows(), 4);
        assert_eq!(loaded.rows_read, 4);

        match data.column("continent").unwrap() {
            Column::Factor { levels, codes } => {
                assert_eq!(levels, &["Africa", "Asia", "Europe"]);
                assert_eq!(codes, &[Some(2), Some(1), Some(0), Some(1)]);
            }
            other => panic!("expected factor, got {other:?}"),
        }
        assert_eq!(
            data.column("year").unwrap(),
            &Column::Numeric(vec![Some(1952.0), Some(1957.0), None, Some(1967.0)])
        );
        assert!(data.column("lifeExp").unwrap().is_missing(1));
    }

    #[test]
    fn short_rows_are_padded_with_missing_cells() {
        let csv = "x,y\n1,2\n3\n";
        let loaded = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(
            loaded.dataset.column("y").unwrap(),
            &Column::Numeric(vec![Some(2.0), None])
        );
    }

    #[test]
    fn header_only_csv_is_insufficient_data() {
        let err = read_dataset("x,y\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = read_dataset("x,x\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
