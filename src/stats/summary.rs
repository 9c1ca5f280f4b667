//! Per-indicator statistics summary.
//!
//! Inputs are raw dataset records in any order. Records are filtered down to
//! those with a numeric value for the key, then ordered most recent first,
//! with undated records after every dated one. Lookbacks are counted in
//! records, so "one month ago" only means one month when the dataset is
//! monthly.

use chrono::NaiveDate;

use crate::domain::{Regime, RegimeSource, RegimeStats, Record, StatisticsSummary};
use crate::stats::change::change_from_abs_base;
use crate::stats::moments::{extent, mean, population_std_dev};

/// Lookbacks reported by the summary, in records.
pub const LOOKBACKS: [usize; 3] = [1, 3, 6];

/// A numeric value together with its date (if any) and source record.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub date: Option<NaiveDate>,
    pub value: f64,
    pub record: &'a Record,
}

/// Valid observations of `key`, most recent first.
///
/// The sort is stable: records sharing a date keep their input order, and
/// undated records keep theirs at the end (`None` orders below any date).
pub fn observations<'a>(data: &'a [Record], key: &str) -> Vec<Observation<'a>> {
    let mut out: Vec<Observation<'a>> = data
        .iter()
        .filter_map(|record| {
            Some(Observation {
                date: record.date(),
                value: record.value(key)?,
                record,
            })
        })
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Compute the statistics summary of `key`.
///
/// Returns `None` exactly when no record carries a numeric `key`.
pub fn calculate_statistics(data: &[Record], key: &str, source: RegimeSource) -> Option<StatisticsSummary> {
    let obs = observations(data, key);
    let latest = obs.first()?;
    let values: Vec<f64> = obs.iter().map(|o| o.value).collect();
    let (min, max) = extent(&values)?;

    let current = latest.value;
    let [one, three, six] = LOOKBACKS.map(|n| values.get(n).copied());
    let change = |prev: Option<f64>| prev.and_then(|p| change_from_abs_base(current, p));

    Some(StatisticsSummary {
        as_of: latest.date,
        observations: obs.len(),
        current,
        min,
        max,
        previous_month: one,
        three_months_ago: three,
        six_months_ago: six,
        one_month_change: change(one),
        three_month_change: change(three),
        six_month_change: change(six),
        expansion: regime_stats(&obs, source, Regime::Expansion),
        recession: regime_stats(&obs, source, Regime::Recession),
    })
}

/// Aggregates over the observations labelled `regime`, `None` if there are none.
pub fn regime_stats(obs: &[Observation<'_>], source: RegimeSource, regime: Regime) -> Option<RegimeStats> {
    let subset: Vec<f64> = obs
        .iter()
        .filter(|o| o.record.regime(source) == Some(regime))
        .map(|o| o.value)
        .collect();

    let (min, max) = extent(&subset)?;
    Some(RegimeStats {
        mean: mean(&subset)?,
        std_dev: population_std_dev(&subset)?,
        min,
        max,
        count: subset.len(),
    })
}
