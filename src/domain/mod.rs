//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loose dated records (`Record`, `FieldValue`) and named `Dataset`s
//! - regime selection (`RegimeSource`, `Regime`)
//! - derived outputs (`StatisticsSummary`, `RegimeStats`, `Trend`)

pub mod types;

pub use types::*;
