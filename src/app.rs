//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - reads environment configuration
//! - parses CLI arguments
//! - prints summaries, reports and transformed series
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{CombineArgs, Command, IndicatorArgs, KeyArgs, NormalizeArgs, SummaryArgs, WinsorizeArgs};
use crate::config::Config;
use crate::domain::{Record, DATE_FIELD};
use crate::error::AppError;
use crate::indicators::{self, IndicatorMeta};
use crate::report::{format_indicators, format_report, format_series, format_summary};
use crate::transform::winsorized_field;

pub mod pipeline;

/// Entry point for the `lens` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    let cli = crate::cli::Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Summary(args) => handle_summary(args, &config),
        Command::Trend(args) => handle_trend(args, &config),
        Command::Normalize(args) => handle_normalize(args, &config),
        Command::Winsorize(args) => handle_winsorize(args, &config),
        Command::Combine(args) => handle_combine(args),
        Command::Indicators(args) => handle_indicators(args),
    }
}

/// Log to stderr so stdout stays clean for reports. `RUST_LOG` overrides the default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("econ_lens=warn"));
    // A second init (tests, embedding) is harmless; ignore it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_summary(args: SummaryArgs, config: &Config) -> Result<(), AppError> {
    let path = pipeline::resolve_input(args.input.input.as_deref(), config)?;
    let dataset = pipeline::load_dataset(&path, args.input.dataset.as_deref())?;
    let source = args.regime.unwrap_or(config.regime);

    let report = pipeline::build_report(&dataset, args.key.as_deref(), source)?;

    match (&args.key, report.indicators.as_slice()) {
        (Some(key), [only]) => {
            println!("{}", format_summary(key, &only.summary, only.trend, indicators::lookup(key)));
        }
        _ => println!("{}", format_report(&report)),
    }

    if let Some(path) = &args.export {
        crate::io::export::write_report_json(path, &report)?;
    }
    Ok(())
}

fn handle_trend(args: KeyArgs, config: &Config) -> Result<(), AppError> {
    let path = pipeline::resolve_input(args.input.input.as_deref(), config)?;
    let dataset = pipeline::load_dataset(&path, args.input.dataset.as_deref())?;
    let trend = crate::series::calculate_trend(&dataset.records, &args.key);
    println!("{} {} {}", indicators::display_name(&args.key), trend.arrow(), trend.as_str());
    Ok(())
}

fn handle_normalize(args: NormalizeArgs, config: &Config) -> Result<(), AppError> {
    let path = pipeline::resolve_input(args.input.input.as_deref(), config)?;
    let dataset = pipeline::load_dataset(&path, args.input.dataset.as_deref())?;
    let records = pipeline::normalize(&dataset.records, args.key.as_deref());

    let fields = match &args.key {
        Some(k) => vec![k.clone()],
        None => crate::report::indicator_keys(&records),
    };
    print_series(&records, &fields, args.rows);

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &records)?;
    }
    Ok(())
}

fn handle_winsorize(args: WinsorizeArgs, config: &Config) -> Result<(), AppError> {
    let path = pipeline::resolve_input(args.input.input.as_deref(), config)?;
    let dataset = pipeline::load_dataset(&path, args.input.dataset.as_deref())?;
    let z = args.z.unwrap_or(config.z_threshold);

    let records = pipeline::winsorize(&dataset.records, &args.key, z)?;
    if let Some(bounds) = crate::transform::winsor_bounds(&dataset.records, &args.key, z) {
        println!(
            "{}: mean={:.4} std={:.4} clip=[{:.4}, {:.4}] (z={z})",
            args.key, bounds.mean, bounds.std_dev, bounds.lower, bounds.upper
        );
    }
    print_series(&records, &[args.key.clone(), winsorized_field(&args.key)], args.rows);

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &records)?;
    }
    Ok(())
}

fn handle_combine(args: CombineArgs) -> Result<(), AppError> {
    let records = pipeline::combine_files(
        (&args.actual, args.actual_dataset.as_deref()),
        (&args.forecast, args.forecast_dataset.as_deref()),
    )?;

    let fields = crate::io::export::series_columns(&records);
    let fields: Vec<String> = fields.into_iter().filter(|f| f != DATE_FIELD).collect();
    print_series(&records, &fields, args.rows);

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &records)?;
    }
    Ok(())
}

fn handle_indicators(args: IndicatorArgs) -> Result<(), AppError> {
    let list: Vec<&IndicatorMeta> = match args.category {
        Some(c) => indicators::by_category(c),
        None if args.recommended => indicators::recommended(),
        None => indicators::all().iter().collect(),
    };
    let list: Vec<&IndicatorMeta> = list.into_iter().filter(|m| !args.recommended || m.recommended).collect();
    print!("{}", format_indicators(&list));
    Ok(())
}

fn print_series(records: &[Record], fields: &[String], rows: usize) {
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
    print!("{}", format_series(records, &fields, rows));
}
