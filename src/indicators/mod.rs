//! Indicator metadata registry.

pub mod registry;

pub use registry::*;
