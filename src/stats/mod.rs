//! Statistics engine: summaries, percentage changes and moments.

pub mod change;
pub mod moments;
pub mod summary;

pub use change::*;
pub use summary::*;
