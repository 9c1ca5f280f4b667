//! Dataset-level reporting: per-indicator summaries and terminal output.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::{is_reserved_field, Record, RegimeSource, StatisticsSummary, Trend, FORECAST_SUFFIX};
use crate::indicators;
use crate::series::calculate_trend;
use crate::stats::calculate_statistics;

pub mod format;

pub use format::*;

/// Summary and trend of one indicator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReport {
    pub key: String,
    pub name: String,
    pub trend: Trend,
    pub summary: StatisticsSummary,
}

/// Summaries for every indicator of a dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReport {
    pub dataset: String,
    pub regime_source: RegimeSource,
    pub indicators: Vec<IndicatorReport>,
    /// Requested keys without a single numeric value.
    pub skipped: Vec<String>,
}

/// Indicator fields of the dataset, sorted.
///
/// Bookkeeping columns and forecast mirrors are excluded, as are fields that
/// never hold a numeric value.
pub fn indicator_keys(data: &[Record]) -> Vec<String> {
    let keys: BTreeSet<&str> = data
        .iter()
        .flat_map(|r| r.iter())
        .filter(|(k, v)| !is_reserved_field(k) && !k.ends_with(FORECAST_SUFFIX) && v.is_numeric())
        .map(|(k, _)| k)
        .collect();
    keys.into_iter().map(str::to_string).collect()
}

/// Summarize every indicator of `data`.
///
/// Keys are independent, so they are processed in parallel; the report lists
/// them in key order.
pub fn summarize_dataset(dataset: &str, data: &[Record], source: RegimeSource) -> DatasetReport {
    summarize_keys(dataset, data, &indicator_keys(data), source)
}

/// Summarize the given keys of `data`.
pub fn summarize_keys(dataset: &str, data: &[Record], keys: &[String], source: RegimeSource) -> DatasetReport {
    let results: Vec<(String, Option<(StatisticsSummary, Trend)>)> = keys
        .par_iter()
        .map(|key| {
            let outcome = calculate_statistics(data, key, source).map(|s| (s, calculate_trend(data, key)));
            (key.clone(), outcome)
        })
        .collect();

    let mut indicators = Vec::new();
    let mut skipped = Vec::new();
    for (key, outcome) in results {
        match outcome {
            Some((summary, trend)) => indicators.push(IndicatorReport {
                name: indicators::display_name(&key).to_string(),
                key,
                trend,
                summary,
            }),
            None => skipped.push(key),
        }
    }

    DatasetReport {
        dataset: dataset.to_string(),
        regime_source: source,
        indicators,
        skipped,
    }
}
