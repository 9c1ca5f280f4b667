//! Percentage-change calculators.
//!
//! Two variants exist and they disagree when the base value is negative:
//!
//! - [`change_from_abs_base`] divides by `|previous|`, so a move from -10 to -5
//!   is +50% (the value rose). The statistics summary and the trend classifier
//!   use this one.
//! - [`calculate_change`] divides by the raw `previous`, so the same move is
//!   -50%. It is the general-purpose helper used for ad-hoc comparisons
//!   between two cells.

use crate::domain::FieldValue;

/// `(current - previous) / |previous| * 100`.
///
/// `None` when `previous` is zero, so a flat-from-zero series never produces
/// an infinite change.
pub fn change_from_abs_base(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// `(current - previous) / previous * 100`, or `0.0` unless both cells are
/// numbers.
///
/// Only `FieldValue::Number` qualifies; numeric text is treated like any other
/// non-number. A zero `previous` yields an infinite (or NaN) result.
pub fn calculate_change(current: &FieldValue, previous: &FieldValue) -> f64 {
    match (current, previous) {
        (FieldValue::Number(c), FieldValue::Number(p)) => (c - p) / p * 100.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_base_guards_zero() {
        assert_eq!(change_from_abs_base(5.0, 0.0), None);
        assert!((change_from_abs_base(110.0, 100.0).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn variants_differ_for_negative_base() {
        let abs = change_from_abs_base(-5.0, -10.0).unwrap();
        let raw = calculate_change(&FieldValue::Number(-5.0), &FieldValue::Number(-10.0));
        assert!((abs - 50.0).abs() < 1e-12);
        assert!((raw + 50.0).abs() < 1e-12);
    }

    #[test]
    fn raw_change_rejects_non_numbers() {
        assert_eq!(calculate_change(&FieldValue::from("10"), &FieldValue::Number(5.0)), 0.0);
        assert_eq!(calculate_change(&FieldValue::Number(10.0), &FieldValue::Null), 0.0);
        assert!((calculate_change(&FieldValue::Number(12.0), &FieldValue::Number(10.0)) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn raw_change_over_zero_is_not_finite() {
        assert!(!calculate_change(&FieldValue::Number(1.0), &FieldValue::Number(0.0)).is_finite());
    }
}
