//! Up/down/neutral classification from the latest move.

use crate::domain::{Record, Trend};
use crate::stats::change::change_from_abs_base;
use crate::stats::summary::observations;

/// Classify `key` by comparing its two most recent valid values.
///
/// Fewer than two valid points, an unchanged value, or a zero previous value
/// all read as `Neutral`.
pub fn calculate_trend(data: &[Record], key: &str) -> Trend {
    let obs = observations(data, key);
    let [latest, previous, ..] = obs.as_slice() else {
        return Trend::Neutral;
    };

    match change_from_abs_base(latest.value, previous.value) {
        Some(c) if c > 0.0 => Trend::Up,
        Some(c) if c < 0.0 => Trend::Down,
        _ => Trend::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DATE_FIELD;

    fn rec(date: &str, v: f64) -> Record {
        Record::new().with(DATE_FIELD, date).with("v", v)
    }

    #[test]
    fn rising_series_is_up() {
        let data = vec![rec("2023-01-01", 5.0), rec("2023-02-01", 10.0)];
        assert_eq!(calculate_trend(&data, "v"), Trend::Up);
    }

    #[test]
    fn uses_dates_not_input_order() {
        let data = vec![rec("2023-02-01", 10.0), rec("2023-03-01", 4.0), rec("2023-01-01", 1.0)];
        assert_eq!(calculate_trend(&data, "v"), Trend::Down);
    }

    #[test]
    fn flat_or_short_series_is_neutral() {
        assert_eq!(calculate_trend(&[], "v"), Trend::Neutral);
        assert_eq!(calculate_trend(&[rec("2023-01-01", 1.0)], "v"), Trend::Neutral);
        let flat = vec![rec("2023-01-01", 3.0), rec("2023-02-01", 3.0)];
        assert_eq!(calculate_trend(&flat, "v"), Trend::Neutral);
    }

    #[test]
    fn year_month_dates_are_ordered() {
        let data = vec![rec("2023-02", 10.0), rec("2023-01", 5.0)];
        assert_eq!(calculate_trend(&data, "v"), Trend::Up);
    }

    #[test]
    fn undated_values_come_after_dated_ones() {
        let data = vec![Record::new().with("v", 100.0), rec("2023-01-01", 5.0)];
        // The undated 100 is older than the dated 5.
        assert_eq!(calculate_trend(&data, "v"), Trend::Down);
        let undated = vec![Record::new().with("v", 1.0), Record::new().with("v", 2.0)];
        // Undated records keep input order: 1 is latest, 2 previous.
        assert_eq!(calculate_trend(&undated, "v"), Trend::Down);
    }

    #[test]
    fn zero_previous_is_neutral() {
        let data = vec![rec("2023-01-01", 0.0), rec("2023-02-01", 3.0)];
        assert_eq!(calculate_trend(&data, "v"), Trend::Neutral);
    }

    #[test]
    fn negative_base_rising_is_up() {
        let data = vec![rec("2023-01-01", -10.0), rec("2023-02-01", -5.0)];
        assert_eq!(calculate_trend(&data, "v"), Trend::Up);
    }
}
