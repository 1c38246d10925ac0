//! `rvoip-staffing`: command-line front end for the staffing engine.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use rvoip_staffing_core::StaffingConfig;

use crate::cli::{Cli, Command};
use crate::logging::{parse_log_level, setup_logging, LoggingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = match &cli.global.log_level {
        Some(level) => LoggingConfig::new(parse_log_level(level)?),
        None => LoggingConfig::from_verbosity(cli.global.verbose),
    };
    if cli.global.log_json {
        logging = logging.with_json();
    }
    if cli.global.log_spans {
        logging = logging.with_spans();
    }
    if cli.global.verbose >= 3 {
        logging = logging.with_file_info();
    }
    setup_logging(logging)?;

    let config = match &cli.global.config {
        Some(path) => StaffingConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => StaffingConfig::default(),
    };
    debug!("Using configuration {:?}", config);

    let output = match &cli.command {
        Command::Calc(args) => commands::run_calc(args, &config, cli.global.output)?,
        Command::Plan(args) => commands::run_plan(args, &config, cli.global.output)?,
    };
    println!("{}", output);
    Ok(())
}
