//! Min-max scaling to `[0, 1]`.
//!
//! Each field is scaled against its own extremes over the whole dataset, so
//! two normalized fields are comparable in shape but not in level.

use std::collections::BTreeSet;

use crate::domain::{FieldValue, KOREA_CYCLE_FIELD, Record, DATE_FIELD, US_CYCLE_FIELD};
use crate::stats::moments::extent;

/// Scaled results in `(-NEGATIVE_NOISE, 0)` are floating-point noise and snap to 0.
pub const NEGATIVE_NOISE: f64 = 0.009;

/// Scale `key` of every record into `[0, 1]`.
///
/// The output has one entry per input record. Numeric values are replaced by
/// `(value - min) / (max - min)`; anything else (text, null, a missing field)
/// comes back unchanged, with a missing field reported as `Null`. A field with
/// a single distinct value scales to all zeros.
pub fn min_max_scaling(data: &[Record], key: &str) -> Vec<FieldValue> {
    let numeric: Vec<f64> = data.iter().filter_map(|r| r.value(key)).collect();
    let bounds = extent(&numeric);

    data.iter()
        .map(|record| match (record.value(key), bounds) {
            (Some(v), Some((min, max))) => FieldValue::Number(scale(v, min, max)),
            _ => record.get(key).cloned().unwrap_or(FieldValue::Null),
        })
        .collect()
}

fn scale(v: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        return 0.0;
    }
    let x = (v - min) / range;
    if x > -NEGATIVE_NOISE && x < 0.0 { 0.0 } else { x }
}

/// Scale every indicator field of the dataset independently.
///
/// The date and regime-label columns are copied through untouched, as are
/// non-numeric cells. Records that lack a field keep lacking it.
pub fn normalize_data(data: &[Record]) -> Vec<Record> {
    let keys: BTreeSet<&str> = data
        .iter()
        .flat_map(|r| r.keys())
        .filter(|k| !matches!(*k, DATE_FIELD | US_CYCLE_FIELD | KOREA_CYCLE_FIELD))
        .collect();

    let mut out = data.to_vec();
    for key in keys {
        let scaled = min_max_scaling(data, key);
        for (record, value) in out.iter_mut().zip(scaled) {
            if record.contains(key) {
                *record = std::mem::take(record).with(key, value);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, v: impl Into<FieldValue>) -> Record {
        Record::new().with(DATE_FIELD, date).with("v", v)
    }

    #[test]
    fn extremes_map_to_unit_interval() {
        let data = vec![rec("2023-01-01", 5.0), rec("2023-02-01", 15.0), rec("2023-03-01", 10.0)];
        let scaled = min_max_scaling(&data, "v");
        assert_eq!(
            scaled,
            vec![FieldValue::Number(0.0), FieldValue::Number(1.0), FieldValue::Number(0.5)]
        );
    }

    #[test]
    fn non_numeric_passes_through() {
        let data = vec![
            rec("2023-01-01", 0.0),
            rec("2023-02-01", "n/a"),
            Record::new().with(DATE_FIELD, "2023-03-01"),
            rec("2023-04-01", 4.0),
        ];
        let scaled = min_max_scaling(&data, "v");
        assert_eq!(scaled[1], FieldValue::from("n/a"));
        assert_eq!(scaled[2], FieldValue::Null);
        assert_eq!(scaled[3], FieldValue::Number(1.0));
    }

    #[test]
    fn constant_field_scales_to_zero() {
        let data = vec![rec("2023-01-01", 3.0), rec("2023-02-01", 3.0)];
        assert!(min_max_scaling(&data, "v").iter().all(|v| *v == FieldValue::Number(0.0)));
    }

    #[test]
    fn near_zero_negative_snaps() {
        assert_eq!(scale(-0.005, 0.0, 1.0), 0.0);
        assert_eq!(scale(-0.5, 0.0, 1.0), -0.5);
    }

    #[test]
    fn normalize_skips_date_and_regime_columns() {
        let data = vec![
            rec("2023-01-01", 10.0).with("w", 1.0).with(US_CYCLE_FIELD, 1.0),
            rec("2023-02-01", 20.0).with("w", 3.0).with(US_CYCLE_FIELD, 0.0),
        ];
        let out = normalize_data(&data);

        assert_eq!(out[0].get(DATE_FIELD), data[0].get(DATE_FIELD));
        assert_eq!(out[0].value(US_CYCLE_FIELD), Some(1.0));
        assert_eq!(out[0].value("v"), Some(0.0));
        assert_eq!(out[1].value("v"), Some(1.0));
        assert_eq!(out[1].value("w"), Some(1.0));
        // The source dataset is untouched.
        assert_eq!(data[1].value("v"), Some(20.0));
    }

    #[test]
    fn normalize_keeps_missing_fields_missing() {
        let data = vec![rec("2023-01-01", 1.0).with("w", 2.0), rec("2023-02-01", 2.0)];
        let out = normalize_data(&data);
        assert!(!out[1].contains("w"));
    }

    #[test]
    fn unit_range_field_is_a_fixed_point_only_when_it_spans_zero_to_one() {
        // Already inside [0, 1] but not touching both ends: rescaled anyway.
        let inside = vec![rec("2023-01-01", 0.2), rec("2023-02-01", 0.5), rec("2023-03-01", 0.8)];
        let out = normalize_data(&inside);
        assert_ne!(out, inside);
        assert_eq!(out[0].value("v"), Some(0.0));

        // Spanning exactly [0, 1]: unchanged.
        let spanning = vec![rec("2023-01-01", 0.0), rec("2023-02-01", 0.25), rec("2023-03-01", 1.0)];
        assert_eq!(normalize_data(&spanning), spanning);

        // A second pass leaves the first pass alone.
        assert_eq!(normalize_data(&out), out);
    }
}
