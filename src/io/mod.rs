//! Input/output helpers.
//!
//! - JSON snapshot + CSV ingest with row-level errors (`ingest`)
//! - series CSV and report JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
