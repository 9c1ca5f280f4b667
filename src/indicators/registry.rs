//! Static indicator metadata.
//!
//! The statistics code only ever sees indicator keys; display names, units and
//! grouping live here so the report layer can label and format values.

use clap::ValueEnum;
use serde::Serialize;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Markets,     // equity indices
    Economics,   // activity, prices, labour
    Rates,       // policy and market rates
    Fx,          // exchange rates
    Commodities, // energy and metals
    Sentiment,   // volatility and survey indices
}

impl Category {
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Markets => "Markets",
            Category::Economics => "Economics",
            Category::Rates => "Rates",
            Category::Fx => "FX",
            Category::Commodities => "Commodities",
            Category::Sentiment => "Sentiment",
        }
    }
}

/// How a value of the indicator is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Index level (e.g. KOSPI 2,650.31)
    Index,
    /// Already a percentage (e.g. CPI YoY 3.2 -> "3.20%")
    Percent,
    /// US dollar price
    Usd,
    /// Korean won price
    Krw,
    /// Dimensionless ratio
    Ratio,
    /// Survey/sentiment points
    Points,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Krw => " KRW",
            Unit::Usd | Unit::Index | Unit::Ratio | Unit::Points => "",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Unit::Usd => "$",
            _ => "",
        }
    }
}

// ============================================================================
// METADATA
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorMeta {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: Unit,
    pub icon: &'static str,
    pub categories: &'static [Category],
    /// Shown on the default dashboard selection.
    pub recommended: bool,
}

macro_rules! ind {
    ($key:expr, $name:expr, $unit:expr, $icon:expr, [$($cat:expr),+], $rec:expr) => {
        IndicatorMeta {
            key: $key,
            name: $name,
            unit: $unit,
            icon: $icon,
            categories: &[$($cat),+],
            recommended: $rec,
        }
    };
}

use Category::*;

static INDICATORS: &[IndicatorMeta] = &[
    // Equity indices
    ind!("kospi", "KOSPI", Unit::Index, "📈", [Markets], true),
    ind!("kosdaq", "KOSDAQ", Unit::Index, "📈", [Markets], false),
    ind!("sp500", "S&P 500", Unit::Index, "🇺🇸", [Markets], true),
    ind!("nasdaq", "NASDAQ Composite", Unit::Index, "💻", [Markets], true),
    ind!("dow", "Dow Jones Industrial", Unit::Index, "🏭", [Markets], false),
    ind!("nikkei", "Nikkei 225", Unit::Index, "🇯🇵", [Markets], false),
    // FX
    ind!("usd_krw", "USD/KRW", Unit::Krw, "💱", [Fx, Markets], true),
    ind!("eur_usd", "EUR/USD", Unit::Ratio, "💶", [Fx], false),
    ind!("usd_jpy", "USD/JPY", Unit::Ratio, "💴", [Fx], false),
    ind!("dxy", "Dollar Index", Unit::Index, "💵", [Fx], true),
    // Commodities
    ind!("wti", "WTI Crude Oil", Unit::Usd, "🛢️", [Commodities], true),
    ind!("brent", "Brent Crude Oil", Unit::Usd, "🛢️", [Commodities], false),
    ind!("gold", "Gold", Unit::Usd, "🥇", [Commodities], true),
    ind!("silver", "Silver", Unit::Usd, "🥈", [Commodities], false),
    ind!("copper", "Copper", Unit::Usd, "🔶", [Commodities, Economics], false),
    // Rates
    ind!("fed_funds", "Fed Funds Rate", Unit::Percent, "🏦", [Rates, Economics], true),
    ind!("kr_base_rate", "BOK Base Rate", Unit::Percent, "🏦", [Rates, Economics], true),
    ind!("us_10y", "US 10Y Treasury Yield", Unit::Percent, "📜", [Rates], true),
    ind!("us_2y", "US 2Y Treasury Yield", Unit::Percent, "📜", [Rates], false),
    ind!("kr_3y", "Korea 3Y Treasury Yield", Unit::Percent, "📜", [Rates], false),
    ind!("yield_spread", "10Y-2Y Spread", Unit::Percent, "📐", [Rates, Economics], true),
    // Economics
    ind!("cpi", "US CPI (YoY)", Unit::Percent, "🛒", [Economics], true),
    ind!("core_cpi", "US Core CPI (YoY)", Unit::Percent, "🛒", [Economics], false),
    ind!("ppi", "US PPI (YoY)", Unit::Percent, "🏗️", [Economics], false),
    ind!("kr_cpi", "Korea CPI (YoY)", Unit::Percent, "🛒", [Economics], true),
    ind!("unemployment", "US Unemployment Rate", Unit::Percent, "👷", [Economics], true),
    ind!("gdp_growth", "US Real GDP Growth", Unit::Percent, "🏛️", [Economics], false),
    ind!("industrial_production", "Industrial Production", Unit::Index, "🏭", [Economics], false),
    ind!("retail_sales", "Retail Sales (YoY)", Unit::Percent, "🛍️", [Economics], false),
    ind!("ism_pmi", "ISM Manufacturing PMI", Unit::Points, "⚙️", [Economics, Sentiment], true),
    ind!("kr_exports", "Korea Exports (YoY)", Unit::Percent, "🚢", [Economics], false),
    // Sentiment
    ind!("vix", "VIX", Unit::Index, "😱", [Sentiment, Markets], true),
    ind!("fear_greed", "Fear & Greed Index", Unit::Points, "🧭", [Sentiment], true),
    ind!("consumer_sentiment", "UMich Consumer Sentiment", Unit::Points, "🙂", [Sentiment, Economics], false),
];

// ============================================================================
// LOOKUPS
// ============================================================================

pub fn all() -> &'static [IndicatorMeta] {
    INDICATORS
}

pub fn lookup(key: &str) -> Option<&'static IndicatorMeta> {
    INDICATORS.iter().find(|m| m.key.eq_ignore_ascii_case(key))
}

pub fn recommended() -> Vec<&'static IndicatorMeta> {
    INDICATORS.iter().filter(|m| m.recommended).collect()
}

pub fn by_category(category: Category) -> Vec<&'static IndicatorMeta> {
    INDICATORS.iter().filter(|m| m.categories.contains(&category)).collect()
}

/// Display name for `key`, falling back to the key itself.
pub fn display_name(key: &str) -> &str {
    lookup(key).map(|m| m.name).unwrap_or(key)
}
