//! `econ-lens` library crate.
//!
//! The binary (`lens`) is a thin wrapper around this library so that:
//!
//! - statistics are testable without spawning processes
//! - a dashboard backend can call the same functions directly
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod io;
pub mod report;
pub mod series;
pub mod stats;
pub mod transform;
