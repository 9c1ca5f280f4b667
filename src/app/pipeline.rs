//! Shared "load -> select -> compute" workflow behind the subcommands.
//!
//! The handlers in `app` only decide what to print and export; everything that
//! produces records or summaries goes through here so it can be tested without
//! parsing argv.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::domain::{Dataset, Record, RegimeSource};
use crate::error::AppError;
use crate::io::ingest::load_path;
use crate::report::{summarize_dataset, summarize_keys, DatasetReport};
use crate::series::combine_data;
use crate::transform::{min_max_scaling, normalize_data, winsorize_data};

/// Resolve the input file: `--input` wins, then `LENS_SNAPSHOT_PATH`.
pub fn resolve_input(flag: Option<&Path>, config: &Config) -> Result<PathBuf, AppError> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.snapshot_path.clone())
        .ok_or_else(|| {
            AppError::input(format!(
                "No input file. Pass --input or set {}.",
                crate::config::SNAPSHOT_PATH_VAR
            ))
        })
}

/// Load a file and pick one dataset out of it.
pub fn load_dataset(path: &Path, name: Option<&str>) -> Result<Dataset, AppError> {
    let data = load_path(path)?;
    let dataset = data.select(name)?.clone();
    debug!(dataset = %dataset.name, records = dataset.records.len(), "selected dataset");
    Ok(dataset)
}

/// Report over one key or every indicator of the dataset.
pub fn build_report(dataset: &Dataset, key: Option<&str>, source: RegimeSource) -> Result<DatasetReport, AppError> {
    let report = match key {
        Some(k) => summarize_keys(&dataset.name, &dataset.records, &[k.to_string()], source),
        None => summarize_dataset(&dataset.name, &dataset.records, source),
    };
    if report.indicators.is_empty() {
        return Err(AppError::no_data(match key {
            Some(k) => format!("No numeric observations for '{k}' in '{}'.", dataset.name),
            None => format!("Dataset '{}' has no numeric indicator values.", dataset.name),
        }));
    }
    Ok(report)
}

/// Normalize one field, or every field when `key` is `None`.
///
/// Either way, records that lack a field keep lacking it.
pub fn normalize(data: &[Record], key: Option<&str>) -> Vec<Record> {
    match key {
        None => normalize_data(data),
        Some(k) => data
            .iter()
            .cloned()
            .zip(min_max_scaling(data, k))
            .map(|(record, value)| if record.contains(k) { record.with(k, value) } else { record })
            .collect(),
    }
}

/// Winsorize one key after validating the threshold.
pub fn winsorize(data: &[Record], key: &str, z: f64) -> Result<Vec<Record>, AppError> {
    if !(z.is_finite() && z > 0.0) {
        return Err(AppError::input(format!("Invalid z threshold {z} (expected a number > 0).")));
    }
    Ok(winsorize_data(data, key, z))
}

/// Load both files and stitch the forecast onto the actual series.
pub fn combine_files(
    actual: (&Path, Option<&str>),
    forecast: (&Path, Option<&str>),
) -> Result<Vec<Record>, AppError> {
    let actual = load_dataset(actual.0, actual.1)?;
    let forecast = load_dataset(forecast.0, forecast.1)?;
    combine_data(&actual.records, &forecast.records)
}
