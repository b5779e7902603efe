//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geo_validate` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Report output and exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geo_validate::config::Opt;
use geo_validate::initialization::init_logger_with;
use geo_validate::{evaluate_exit_code, run_validation, Config};

fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_validation(&config) {
        Ok(report) => {
            report
                .write_to(config.report_format, std::io::stdout().lock())
                .context("Failed to print report")?;
            let code = evaluate_exit_code(config.fail_on, &report);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("geo_validate error: {:#}", e);
            process::exit(1);
        }
    }
}
