//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - loads AIC values or fits models
//! - prints the comparison and writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Command, CompareArgs, FitArgs, OutputArgs};
use crate::domain::CompareConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `aicw` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Compare(args) => handle_compare(args),
        Command::Fit(args) => handle_fit(args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) is harmless; ignore the error.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = compare_config_from_args(&args.output);
    let run = pipeline::run_compare(&args.aic, args.input.as_deref())?;

    println!("{}", crate::report::format_comparison(&run.table, &config));
    write_exports(&run.table, &config)
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = compare_config_from_args(&args.output);
    let run = pipeline::run_fit(&args.data, &args.models)?;

    println!(
        "{}\n",
        crate::report::format_data_summary(run.rows_read, run.rows_skipped)
    );
    if args.details {
        println!(
            "{}",
            crate::report::format_fit_summary(&run.comparison.fits, config.digits)
        );
    }
    println!(
        "{}",
        crate::report::format_comparison(&run.comparison.table, &config)
    );
    write_exports(&run.comparison.table, &config)
}

fn write_exports(table: &crate::domain::ComparisonTable, config: &CompareConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_csv {
        crate::io::export::write_comparison_csv(path, table)?;
        info!(path = %path.display(), "wrote comparison CSV");
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_comparison_json(path, table)?;
        info!(path = %path.display(), "wrote comparison JSON");
    }
    Ok(())
}

pub fn compare_config_from_args(args: &OutputArgs) -> CompareConfig {
    CompareConfig {
        digits: args.digits,
        ranked: args.ranked,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}
