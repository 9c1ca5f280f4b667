//! Shared domain types.
//!
//! Records are kept as loose field maps because upstream snapshots mix shapes:
//! a markets dataset and an economics dataset share nothing but the date
//! column. Everything is serializable so summaries and transformed series can
//! be exported as-is.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Date column present on every record.
pub const DATE_FIELD: &str = "DATA_YMD";
/// US business-cycle regime label (0 = expansion, 1 = recession).
pub const US_CYCLE_FIELD: &str = "economic_phase";
/// Korean business-cycle regime label, same encoding.
pub const KOREA_CYCLE_FIELD: &str = "kor";
/// Flag set on bridge and forecast records by the series combiner.
pub const FORECAST_FLAG_FIELD: &str = "isForecast";
/// Suffix of the mirrored fields carried by forecast records.
pub const FORECAST_SUFFIX: &str = "_forecast";

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric reading of the value.
    ///
    /// Numbers count unless they are NaN. Text counts when the whole trimmed
    /// string parses as a finite number, so `"12.5"` is numeric while
    /// `"12.5%"`, `""` and `"n/a"` are not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) if !v.is_nan() => Some(*v),
            FieldValue::Text(s) => {
                let v = s.trim().parse::<f64>().ok()?;
                v.is_finite().then_some(v)
            }
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null),
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            // Nested values are not indicators; keep them readable.
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One dated row of a dataset.
///
/// Records are values: the "mutating" helpers take `self` and hand back a new
/// record, so transforms always work on clones of their input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Numeric value of `key`, if present and numeric.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_f64)
    }

    /// Parsed `DATA_YMD`.
    pub fn date(&self) -> Option<NaiveDate> {
        match self.get(DATE_FIELD)? {
            FieldValue::Text(s) => parse_record_date(s),
            FieldValue::Number(v) if v.fract() == 0.0 => parse_record_date(&format!("{}", *v as i64)),
            _ => None,
        }
    }

    /// Regime label read through `source`.
    pub fn regime(&self, source: RegimeSource) -> Option<Regime> {
        self.get(source.field_name()).and_then(Regime::from_label)
    }

    /// Return a copy of this record with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Parse a record date.
///
/// Accepts `YYYY-MM-DD`, `YYYYMMDD`, ISO timestamps (the time part is
/// dropped), and the coarser `YYYY-MM` and `YYYY`, which read as the first
/// day of the period.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let all_digits = s.bytes().all(|b| b.is_ascii_digit());
    match s.len() {
        8 if all_digits => NaiveDate::parse_from_str(s, "%Y%m%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok(),
        4 if all_digits => s.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        _ => s.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()),
    }
}

/// True for the bookkeeping columns that are never treated as indicators.
pub fn is_reserved_field(key: &str) -> bool {
    matches!(key, DATE_FIELD | US_CYCLE_FIELD | KOREA_CYCLE_FIELD | FORECAST_FLAG_FIELD)
}

/// Which regime label column conditions the statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum RegimeSource {
    /// `economic_phase`
    #[default]
    #[serde(rename = "us")]
    #[value(name = "us")]
    UsCycle,
    /// `kor`
    #[serde(rename = "korea")]
    #[value(name = "korea")]
    KoreaCycle,
}

impl RegimeSource {
    pub fn field_name(self) -> &'static str {
        match self {
            RegimeSource::UsCycle => US_CYCLE_FIELD,
            RegimeSource::KoreaCycle => KOREA_CYCLE_FIELD,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RegimeSource::UsCycle => "US cycle",
            RegimeSource::KoreaCycle => "Korea cycle",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "us" | "usa" | "economic_phase" => Some(RegimeSource::UsCycle),
            "korea" | "kr" | "kor" => Some(RegimeSource::KoreaCycle),
            _ => None,
        }
    }
}

/// Binary business-cycle label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Expansion,
    Recession,
}

impl Regime {
    /// `0` is expansion, `1` is recession; any other label is unknown.
    pub fn from_label(value: &FieldValue) -> Option<Self> {
        match value.as_f64()? {
            v if v == 0.0 => Some(Regime::Expansion),
            v if v == 1.0 => Some(Regime::Recession),
            _ => None,
        }
    }
}

/// Direction of the latest move in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Neutral => "neutral",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Neutral => "-",
        }
    }
}

/// Aggregates over the records of one regime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeStats {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Derived statistics for one indicator.
///
/// Anything that can be undefined for a given dataset (a lookback past the
/// start of the series, a zero base value, an empty regime subset) is an
/// `Option` so callers have to decide how to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Date of `current`; `None` when the latest value comes from an undated record.
    pub as_of: Option<NaiveDate>,
    pub observations: usize,
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub previous_month: Option<f64>,
    pub three_months_ago: Option<f64>,
    pub six_months_ago: Option<f64>,
    pub one_month_change: Option<f64>,
    pub three_month_change: Option<f64>,
    pub six_month_change: Option<f64>,
    pub expansion: Option<RegimeStats>,
    pub recession: Option<RegimeStats>,
}

impl StatisticsSummary {
    pub fn regime(&self, regime: Regime) -> Option<&RegimeStats> {
        match regime {
            Regime::Expansion => self.expansion.as_ref(),
            Regime::Recession => self.recession.as_ref(),
        }
    }

    pub fn expansion_avg(&self) -> Option<f64> {
        self.expansion.map(|s| s.mean)
    }

    pub fn recession_avg(&self) -> Option<f64> {
        self.recession.map(|s| s.mean)
    }

    pub fn expansion_std_dev(&self) -> Option<f64> {
        self.expansion.map(|s| s.std_dev)
    }

    pub fn recession_std_dev(&self) -> Option<f64> {
        self.recession.map(|s| s.std_dev)
    }
}

/// A named sequence of records (one page section of a snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}
