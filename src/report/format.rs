//! Terminal formatting for summaries, reports and the indicator registry.
//!
//! Formatting lives here so the statistics code never deals with strings.
//! Undefined values print as `n/a`.

use crate::domain::{FieldValue, Record, RegimeStats, StatisticsSummary, Trend, DATE_FIELD};
use crate::indicators::{IndicatorMeta, Unit};
use crate::report::DatasetReport;

const NA: &str = "n/a";

/// Format a single indicator summary block.
pub fn format_summary(key: &str, summary: &StatisticsSummary, trend: Trend, meta: Option<&IndicatorMeta>) -> String {
    let unit = meta.map(|m| m.unit);
    let mut out = String::new();

    let title = match meta {
        Some(m) => format!("{} {} ({key})", m.icon, m.name),
        None => key.to_string(),
    };
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!(
        "As-of: {} | n={} | trend: {} {}\n",
        summary.as_of.map_or_else(|| NA.to_string(), |d| d.to_string()),
        summary.observations,
        trend.arrow(),
        trend.as_str()
    ));
    out.push_str(&format!(
        "Current: {} | range=[{}, {}]\n",
        fmt_value(summary.current, unit),
        fmt_value(summary.min, unit),
        fmt_value(summary.max, unit)
    ));

    out.push_str("\nChanges:\n");
    for (label, base, change) in [
        ("1 period", summary.previous_month, summary.one_month_change),
        ("3 periods", summary.three_months_ago, summary.three_month_change),
        ("6 periods", summary.six_months_ago, summary.six_month_change),
    ] {
        out.push_str(&format!(
            "- {label:<10} from {:>14}  {:>9}\n",
            fmt_opt_value(base, unit),
            fmt_pct(change)
        ));
    }

    out.push_str("\nBy regime:\n");
    out.push_str(&format!("- expansion  {}\n", fmt_regime(summary.expansion.as_ref(), unit)));
    out.push_str(&format!("- recession  {}\n", fmt_regime(summary.recession.as_ref(), unit)));

    out
}

/// Format the per-indicator table of a dataset report.
pub fn format_report(report: &DatasetReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== lens - {} ({}) ===\n",
        report.dataset,
        report.regime_source.display_name()
    ));

    out.push_str(
        format!(
            "{:<24} {:>14} {:>9} {:>9} {:>9} {:<8}\n",
            "indicator", "current", "1p", "3p", "6p", "trend"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<24} {:-<14} {:-<9} {:-<9} {:-<9} {:-<8}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for row in &report.indicators {
        let unit = crate::indicators::lookup(&row.key).map(|m| m.unit);
        let s = &row.summary;
        out.push_str(
            format!(
                "{:<24} {:>14} {:>9} {:>9} {:>9} {:<8}\n",
                truncate(&row.name, 24),
                fmt_value(s.current, unit),
                fmt_pct(s.one_month_change),
                fmt_pct(s.three_month_change),
                fmt_pct(s.six_month_change),
                format!("{} {}", row.trend.arrow(), row.trend.as_str()),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if !report.skipped.is_empty() {
        out.push_str(&format!("\n(no numeric values) {}\n", report.skipped.join(", ")));
    }

    out
}

/// Format the registry listing.
pub fn format_indicators(list: &[&IndicatorMeta]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<22} {:<28} {:<8} {:<24} {}\n", "key", "name", "unit", "categories", "rec").trim_end());
    out.push('\n');
    for m in list {
        let cats: Vec<&str> = m.categories.iter().map(|c| c.display_name()).collect();
        out.push_str(
            format!(
                "{:<22} {:<28} {:<8} {:<24} {}\n",
                m.key,
                truncate(m.name, 28),
                format!("{:?}", m.unit).to_lowercase(),
                cats.join(","),
                if m.recommended { "*" } else { "" },
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Format the first `limit` rows of a transformed series for `fields`.
pub fn format_series(records: &[Record], fields: &[&str], limit: usize) -> String {
    let mut out = String::new();
    let mut header = format!("{:<12}", DATE_FIELD);
    for f in fields {
        header.push_str(&format!(" {:>18}", truncate(f, 18)));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for r in records.iter().take(limit) {
        let date = r.get(DATE_FIELD).map(FieldValue::to_string).unwrap_or_default();
        let mut line = format!("{date:<12}");
        for f in fields {
            let cell = match r.get(f) {
                Some(FieldValue::Number(v)) => format!("{v:.4}"),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            line.push_str(&format!(" {cell:>18}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    if records.len() > limit {
        out.push_str(&format!("... ({} more rows)\n", records.len() - limit));
    }
    out
}

fn fmt_regime(stats: Option<&RegimeStats>, unit: Option<Unit>) -> String {
    match stats {
        Some(s) => format!(
            "n={:<4} mean={} std={} range=[{}, {}]",
            s.count,
            fmt_value(s.mean, unit),
            fmt_value(s.std_dev, unit),
            fmt_value(s.min, unit),
            fmt_value(s.max, unit)
        ),
        None => NA.to_string(),
    }
}

/// Unit-aware value with thousands separators and two decimals.
pub fn fmt_value(v: f64, unit: Option<Unit>) -> String {
    if !v.is_finite() {
        return NA.to_string();
    }
    let body = group_thousands(v, 2);
    match unit {
        Some(u) => format!("{}{body}{}", u.prefix(), u.suffix()),
        None => body,
    }
}

fn fmt_opt_value(v: Option<f64>, unit: Option<Unit>) -> String {
    v.map(|v| fmt_value(v, unit)).unwrap_or_else(|| NA.to_string())
}

/// Signed percentage with two decimals.
pub fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:+.2}%"),
        _ => NA.to_string(),
    }
}

fn group_thousands(v: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && raw.bytes().any(|b| b != b'0' && b != b'.') { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RegimeSource, StatisticsSummary};
    use crate::report::IndicatorReport;
    use chrono::NaiveDate;

    fn summary() -> StatisticsSummary {
        StatisticsSummary {
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1),
            observations: 2,
            current: 1345.5,
            min: 1200.0,
            max: 1345.5,
            previous_month: Some(1200.0),
            three_months_ago: None,
            six_months_ago: None,
            one_month_change: Some(12.126),
            three_month_change: None,
            six_month_change: None,
            expansion: None,
            recession: Some(RegimeStats {
                mean: 1272.75,
                std_dev: 72.75,
                min: 1200.0,
                max: 1345.5,
                count: 2,
            }),
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(-999.0, 2), "-999.00");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
        assert_eq!(group_thousands(100.0, 0), "100");
    }

    #[test]
    fn undefined_values_render_as_na() {
        assert_eq!(fmt_pct(None), "n/a");
        assert_eq!(fmt_pct(Some(f64::INFINITY)), "n/a");
        assert_eq!(fmt_pct(Some(3.456)), "+3.46%");
        assert_eq!(fmt_value(f64::NAN, None), "n/a");
    }

    #[test]
    fn units_decorate_values() {
        assert_eq!(fmt_value(1345.5, Some(Unit::Krw)), "1,345.50 KRW");
        assert_eq!(fmt_value(80.1, Some(Unit::Usd)), "$80.10");
        assert_eq!(fmt_value(3.2, Some(Unit::Percent)), "3.20%");
    }

    #[test]
    fn summary_block_mentions_missing_regime() {
        let meta = crate::indicators::lookup("usd_krw");
        let text = format_summary("usd_krw", &summary(), Trend::Up, meta);
        assert!(text.contains("USD/KRW"));
        assert!(text.contains("1,345.50 KRW"));
        assert!(text.contains("+12.13%"));
        assert!(text.contains("- expansion  n/a"));
        assert!(text.contains("n=2"));
    }

    #[test]
    fn report_table_lists_rows() {
        let report = DatasetReport {
            dataset: "markets".to_string(),
            regime_source: RegimeSource::KoreaCycle,
            indicators: vec![IndicatorReport {
                key: "usd_krw".to_string(),
                name: "USD/KRW".to_string(),
                trend: Trend::Up,
                summary: summary(),
            }],
            skipped: vec!["orphan".to_string()],
        };
        let text = format_report(&report);
        assert!(text.starts_with("=== lens - markets (Korea cycle) ==="));
        assert!(text.contains("USD/KRW"));
        assert!(text.contains("orphan"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
