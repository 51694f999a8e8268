//! # Takeoff CLI Application
//!
//! Terminal front end for the takeoff_core quantity calculators.
//!
//! ```text
//! takeoff beam --length 4000 --width 300 --depth 500 --main-bar-diameter 16 \
//!     --main-bar-count 4 --stirrup-diameter 8 --stirrup-spacing 150 --stirrup-cover 25
//! takeoff batch elements.json --format json
//! takeoff interactive slab
//! ```

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use takeoff_core::report::ReportOptions;
use takeoff_core::CalculationItem;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::commands::Settings;
use crate::config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.format == Some(OutputFormat::Json) => {
            commands::print_error(&e)?;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    let settings = Settings {
        format: cli.format.unwrap_or(config.output_format),
        report: ReportOptions {
            show_breakdown: config.show_breakdown && !cli.no_breakdown,
        },
    };

    match cli.command {
        Commands::Beam(args) => commands::run_single(&CalculationItem::Beam(args.into()), settings),
        Commands::Column(args) => commands::run_single(&CalculationItem::Column(args.into()), settings),
        Commands::Footing(args) => commands::run_single(&CalculationItem::Footing(args.into()), settings),
        Commands::Slab(args) => commands::run_single(&CalculationItem::Slab(args.into()), settings),
        Commands::Batch { file } => commands::run_batch(&file, settings),
        Commands::Interactive { kind } => commands::run_interactive(kind, settings),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
