//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. CLI flags take precedence over anything configured here.

use std::env;
use std::path::PathBuf;

use crate::domain::RegimeSource;
use crate::error::AppError;
use crate::transform::DEFAULT_Z_THRESHOLD;

pub const SNAPSHOT_PATH_VAR: &str = "LENS_SNAPSHOT_PATH";
pub const REGIME_VAR: &str = "LENS_REGIME";
pub const Z_THRESHOLD_VAR: &str = "LENS_Z_THRESHOLD";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default input file when `--input` is omitted.
    pub snapshot_path: Option<PathBuf>,
    /// Default regime column for statistics.
    pub regime: RegimeSource,
    /// Default winsorization threshold.
    pub z_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            regime: RegimeSource::UsCycle,
            z_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read the `LENS_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Config::default();

        if let Some(path) = lookup(SNAPSHOT_PATH_VAR).filter(|s| !s.trim().is_empty()) {
            config.snapshot_path = Some(PathBuf::from(path.trim()));
        }

        if let Some(raw) = lookup(REGIME_VAR) {
            config.regime = RegimeSource::parse(&raw).ok_or_else(|| {
                AppError::input(format!("Invalid {REGIME_VAR}='{raw}' (expected `us` or `korea`)."))
            })?;
        }

        if let Some(raw) = lookup(Z_THRESHOLD_VAR) {
            config.z_threshold = parse_z_threshold(&raw)
                .ok_or_else(|| AppError::input(format!("Invalid {Z_THRESHOLD_VAR}='{raw}' (expected a number > 0).")))?;
        }

        Ok(config)
    }
}

/// A usable winsorization threshold: finite and strictly positive.
pub fn parse_z_threshold(raw: &str) -> Option<f64> {
    let z = raw.trim().parse::<f64>().ok()?;
    (z.is_finite() && z > 0.0).then_some(z)
}
