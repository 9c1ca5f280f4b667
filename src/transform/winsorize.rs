//! Winsorization: clip outliers to `mean ± z·std` for chart display.

use crate::domain::{FieldValue, Record};
use crate::stats::moments::{mean, population_std_dev};

/// Default clipping threshold, in standard deviations.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;
/// Suffix of the field holding the clipped value.
pub const WINSORIZED_SUFFIX: &str = "_winsorized";

/// Clipping bounds derived from a field's population moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinsorBounds {
    pub mean: f64,
    pub std_dev: f64,
    pub lower: f64,
    pub upper: f64,
}

impl WinsorBounds {
    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.lower).min(self.upper)
    }
}

/// Bounds for `key`, `None` when the field has no numeric values.
///
/// `z` is used as a magnitude; a negative threshold behaves like its absolute
/// value.
pub fn winsor_bounds(data: &[Record], key: &str, z: f64) -> Option<WinsorBounds> {
    let values: Vec<f64> = data.iter().filter_map(|r| r.value(key)).collect();
    let m = mean(&values)?;
    let sd = population_std_dev(&values)?;
    let half_width = z.abs() * sd;
    Some(WinsorBounds {
        mean: m,
        std_dev: sd,
        lower: m - half_width,
        upper: m + half_width,
    })
}

/// Name of the field `winsorize_data` writes for `key`.
pub fn winsorized_field(key: &str) -> String {
    format!("{key}{WINSORIZED_SUFFIX}")
}

/// Copy each record with `<key>_winsorized` added.
///
/// Numeric values are clamped into the bounds; non-numeric values (and a
/// missing field, as `Null`) are carried over unchanged under the new name.
pub fn winsorize_data(data: &[Record], key: &str, z: f64) -> Vec<Record> {
    let bounds = winsor_bounds(data, key, z);
    let field = winsorized_field(key);

    data.iter()
        .map(|record| {
            let value = match (record.value(key), bounds) {
                (Some(v), Some(b)) => FieldValue::Number(b.clamp(v)),
                _ => record.get(key).cloned().unwrap_or(FieldValue::Null),
            };
            record.clone().with(field.as_str(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(v: impl Into<FieldValue>) -> Record {
        Record::new().with("v", v)
    }

    #[test]
    fn clamps_outlier_to_one_sigma() {
        let data = vec![rec(1.0), rec(2.0), rec(100.0)];
        let out = winsorize_data(&data, "v", 1.0);

        let b = winsor_bounds(&data, "v", 1.0).unwrap();
        let clipped = out[2].value("v_winsorized").unwrap();
        assert!((clipped - (b.mean + b.std_dev)).abs() < 1e-9);
        assert!(clipped < 100.0);
        // The original value is kept alongside.
        assert_eq!(out[2].value("v"), Some(100.0));
    }

    #[test]
    fn values_inside_bounds_are_unchanged() {
        let data = vec![rec(1.0), rec(2.0), rec(3.0)];
        let out = winsorize_data(&data, "v", DEFAULT_Z_THRESHOLD);
        for (src, dst) in data.iter().zip(&out) {
            assert_eq!(src.value("v"), dst.value("v_winsorized"));
        }
    }

    #[test]
    fn non_numeric_passes_through_under_new_name() {
        let data = vec![rec(1.0), rec("n/a"), Record::new(), rec(3.0)];
        let out = winsorize_data(&data, "v", 2.0);
        assert_eq!(out[1].get("v_winsorized"), Some(&FieldValue::from("n/a")));
        assert_eq!(out[2].get("v_winsorized"), Some(&FieldValue::Null));
    }

    #[test]
    fn all_non_numeric_field_is_copied() {
        let data = vec![rec("a"), rec("b")];
        let out = winsorize_data(&data, "v", 3.0);
        assert_eq!(out[0].get("v_winsorized"), Some(&FieldValue::from("a")));
        assert!(winsor_bounds(&data, "v", 3.0).is_none());
    }

    #[test]
    fn negative_threshold_uses_magnitude() {
        let data = vec![rec(1.0), rec(2.0), rec(100.0)];
        assert_eq!(winsor_bounds(&data, "v", -1.0), winsor_bounds(&data, "v", 1.0));
    }
}
