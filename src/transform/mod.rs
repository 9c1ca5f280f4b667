//! Display transforms: min-max normalization and winsorization.
//!
//! Both return fresh records; the input dataset is never modified.

pub mod scaling;
pub mod winsorize;

pub use scaling::*;
pub use winsorize::*;
