//! Export transformed series (CSV) and dataset reports (JSON).
//!
//! Exports are meant to be easy to consume from spreadsheets or a chart layer.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::{FieldValue, Record, DATE_FIELD};
use crate::error::AppError;
use crate::report::DatasetReport;

/// Column order for a series export: the date first, then every other field
/// that appears on any record, sorted.
pub fn series_columns(records: &[Record]) -> Vec<String> {
    let rest: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.keys())
        .filter(|k| *k != DATE_FIELD)
        .collect();

    std::iter::once(DATE_FIELD)
        .chain(rest)
        .map(str::to_string)
        .collect()
}

/// Write records as CSV to any writer.
pub fn write_series<W: Write>(writer: W, records: &[Record]) -> Result<(), AppError> {
    let columns = series_columns(records);
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(&columns)
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for r in records {
        let row = columns.iter().map(|c| match r.get(c) {
            Some(FieldValue::Null) | None => String::new(),
            Some(v) => v.to_string(),
        });
        out.write_record(row)
            .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write records to a CSV file.
pub fn write_series_csv(path: &Path, records: &[Record]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series(BufWriter::new(file), records)?;
    info!(path = %path.display(), rows = records.len(), "wrote series csv");
    Ok(())
}

/// Write a dataset report as pretty JSON.
pub fn write_report_json(path: &Path, report: &DatasetReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .map_err(|e| AppError::output(format!("Failed to write report JSON: {e}")))?;

    info!(path = %path.display(), indicators = report.indicators.len(), "wrote report json");
    Ok(())
}
