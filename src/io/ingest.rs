//! Dataset ingest from JSON snapshots and CSV exports.
//!
//! This module turns a file on disk into named `Dataset`s of loose records.
//!
//! Design goals:
//! - **Lenient rows**: a bad row is skipped and reported, never fatal
//! - **Strict files**: an unreadable or structurally wrong file is an error (exit code 2)
//! - **No interpretation**: cells are kept as-is; deciding what is numeric is
//!   left to the statistics code

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::StringRecord;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Dataset, FieldValue, Record};
use crate::error::AppError;

/// Dataset name used when a file holds a single unnamed series.
pub const DEFAULT_DATASET: &str = "default";

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub dataset: String,
    /// 1-based row number (CSV: file line; JSON: array position).
    pub row: usize,
    pub message: String,
}

/// Ingest output: datasets + row bookkeeping.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub datasets: Vec<Dataset>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl IngestedData {
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }

    /// Pick a dataset by name, or the only one when no name is given.
    pub fn select(&self, name: Option<&str>) -> Result<&Dataset, AppError> {
        match name {
            Some(n) => self.dataset(n).ok_or_else(|| {
                AppError::input(format!("Unknown dataset '{n}'. Available: {}.", self.names().join(", ")))
            }),
            None => match self.datasets.as_slice() {
                [only] => Ok(only),
                _ => Err(AppError::input(format!(
                    "Input holds several datasets; choose one with --dataset ({}).",
                    self.names().join(", ")
                ))),
            },
        }
    }
}

/// Load a dataset file, choosing the format from the extension.
pub fn load_path(path: &Path) -> Result<IngestedData, AppError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv { load_csv(path) } else { load_snapshot(path) }
}

/// Load a JSON snapshot.
///
/// Accepted shapes:
/// - `[ {record}, ... ]`: a single dataset named `default`
/// - `{ "markets": [ ... ], "economics": [ ... ] }`: named datasets
pub fn load_snapshot(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open snapshot '{}': {e}", path.display())))?;
    let root: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid snapshot JSON '{}': {e}", path.display())))?;

    let data = ingest_json(root)?;
    debug!(
        path = %path.display(),
        datasets = data.datasets.len(),
        rows = data.rows_used,
        "loaded snapshot"
    );
    finish(data)
}

/// Build datasets from an already-parsed JSON document.
pub fn ingest_json(root: Value) -> Result<IngestedData, AppError> {
    let mut out = IngestedData {
        datasets: Vec::new(),
        row_errors: Vec::new(),
        rows_read: 0,
        rows_used: 0,
    };

    match root {
        Value::Array(rows) => push_json_dataset(&mut out, DEFAULT_DATASET, rows),
        Value::Object(members) => {
            for (name, member) in members {
                match member {
                    Value::Array(rows) => push_json_dataset(&mut out, &name, rows),
                    _ => warn!(member = %name, "ignoring non-array snapshot member"),
                }
            }
        }
        _ => {
            return Err(AppError::input(
                "Snapshot must be an array of records or an object of named arrays.",
            ));
        }
    }

    Ok(out)
}

fn push_json_dataset(out: &mut IngestedData, name: &str, rows: Vec<Value>) {
    let mut records: Vec<Record> = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        out.rows_read += 1;
        match row {
            Value::Object(fields) => {
                records.push(fields.iter().map(|(k, v)| (k.clone(), FieldValue::from(v))).collect());
            }
            other => out.row_errors.push(RowError {
                dataset: name.to_string(),
                row: idx + 1,
                message: format!("Expected an object, found {}.", json_kind(&other)),
            }),
        }
    }
    out.rows_used += records.len();
    out.datasets.push(Dataset::new(name, records));
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load a CSV export as a single dataset named after the file stem.
pub fn load_csv(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_DATASET)
        .to_string();

    let data = ingest_csv(file, &name)?;
    debug!(path = %path.display(), rows = data.rows_used, "loaded csv");
    finish(data)
}

/// Build a dataset from CSV text.
pub fn ingest_csv<R: std::io::Read>(input: R, name: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = header_names(&headers);
    ensure_unique_columns(&columns)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header line, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        match result {
            Ok(row) if row.len() != columns.len() => row_errors.push(RowError {
                dataset: name.to_string(),
                row: line,
                message: format!("Expected {} cells, found {}.", columns.len(), row.len()),
            }),
            Ok(row) => records.push(parse_row(&row, &columns)),
            Err(e) => row_errors.push(RowError {
                dataset: name.to_string(),
                row: line,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    let rows_used = records.len();
    Ok(IngestedData {
        datasets: vec![Dataset::new(name, records)],
        row_errors,
        rows_read,
        rows_used,
    })
}

fn header_names(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(normalize_header_name).collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn ensure_unique_columns(columns: &[String]) -> Result<(), AppError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (idx, col) in columns.iter().enumerate() {
        if col.is_empty() {
            return Err(AppError::input(format!("CSV column {} has an empty header.", idx + 1)));
        }
        if let Some(first) = seen.insert(col, idx) {
            return Err(AppError::input(format!(
                "Duplicate CSV column '{col}' (columns {} and {}).",
                first + 1,
                idx + 1
            )));
        }
    }
    Ok(())
}

fn parse_row(row: &StringRecord, columns: &[String]) -> Record {
    columns
        .iter()
        .zip(row.iter())
        .map(|(col, cell)| (col.clone(), parse_cell(cell)))
        .collect()
}

fn parse_cell(cell: &str) -> FieldValue {
    if cell.is_empty() {
        return FieldValue::Null;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => FieldValue::Number(v),
        _ => FieldValue::Text(cell.to_string()),
    }
}

fn finish(data: IngestedData) -> Result<IngestedData, AppError> {
    for err in &data.row_errors {
        warn!(dataset = %err.dataset, row = err.row, "{}", err.message);
    }
    if data.rows_used == 0 {
        return Err(AppError::no_data("No valid rows found in input."));
    }
    Ok(data)
}
