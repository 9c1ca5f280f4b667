//! Series-level helpers: forecast stitching and trend labels.

pub mod combine;
pub mod trend;

pub use combine::*;
pub use trend::*;
