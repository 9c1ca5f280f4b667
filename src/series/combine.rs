//! Stitch the tail of an actual series onto a forecast continuation.
//!
//! Charts draw the actual and forecast lines from different fields. The bridge
//! record repeats the last actual point under the `_forecast` names so the two
//! lines meet.

use chrono::{Months, NaiveDate};

use crate::domain::{FieldValue, Record, DATE_FIELD, FORECAST_FLAG_FIELD, FORECAST_SUFFIX};
use crate::error::AppError;

/// Number of most recent actual records kept in front of the forecast.
pub const ACTUAL_WINDOW: usize = 12;

/// Build `[actual tail (ascending), bridge, forecasts...]`.
///
/// Forecast record `i` is re-dated to the last actual date plus `i + 1`
/// calendar months (clamped to month end, so Jan 31 + 1 month is Feb 28/29).
/// The output is not re-sorted; ordering comes from construction.
pub fn combine_data(actual: &[Record], forecast: &[Record]) -> Result<Vec<Record>, AppError> {
    let mut dated: Vec<(Option<NaiveDate>, &Record)> = actual.iter().map(|r| (r.date(), r)).collect();
    // Most recent first; undated records sink to the end.
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut window: Vec<Record> = dated
        .into_iter()
        .take(ACTUAL_WINDOW)
        .map(|(_, r)| r.clone())
        .collect();
    window.reverse();

    let last = window
        .last()
        .ok_or_else(|| AppError::no_data("Cannot combine a forecast with an empty actual series."))?;
    let last_date = last
        .date()
        .ok_or_else(|| AppError::no_data("The most recent actual record has no valid date."))?;

    let bridge = bridge_record(last);

    let mut out = Vec::with_capacity(window.len() + 1 + forecast.len());
    out.extend(window);
    out.push(bridge);

    for (i, record) in forecast.iter().enumerate() {
        let date = add_months(last_date, i + 1).ok_or_else(|| {
            AppError::input(format!("Forecast step {} overflows the calendar.", i + 1))
        })?;
        out.push(
            record
                .clone()
                .with(DATE_FIELD, date.format("%Y-%m-%d").to_string())
                .with(FORECAST_FLAG_FIELD, true),
        );
    }

    Ok(out)
}

/// Copy of `last` with every value field mirrored under `<field>_forecast`.
fn bridge_record(last: &Record) -> Record {
    let mirrored: Vec<(String, FieldValue)> = last
        .iter()
        .filter(|(k, _)| *k != DATE_FIELD && *k != FORECAST_FLAG_FIELD && !k.ends_with(FORECAST_SUFFIX))
        .map(|(k, v)| (format!("{k}{FORECAST_SUFFIX}"), v.clone()))
        .collect();

    mirrored
        .into_iter()
        .fold(last.clone(), |r, (k, v)| r.with(k, v))
        .with(FORECAST_FLAG_FIELD, true)
}

fn add_months(date: NaiveDate, months: usize) -> Option<NaiveDate> {
    let months = u32::try_from(months).ok()?;
    date.checked_add_months(Months::new(months))
}
