// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod planner;
pub mod scanner;
pub mod stamp;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<ExitCode> {
    run_with(Cli::parse())
}

pub fn run_with(args: Cli) -> Result<ExitCode> {
    let config = resolve_config(args)?;

    if config.dirs.is_empty() {
        log::error!("Parameter --dirs is not set");
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    }

    if config.create_month_dir && !config.create_year_dir {
        log::warn!("--create-month-dir has no effect without --create-year-dir");
    }
    if config.dry_run {
        log::info!("Dry run, nothing will be changed");
    }

    let summary = Scanner::new(&config).scan();

    println!("{}", OutputGenerator::summary_line(&summary, config.dry_run));

    // Per-file failures are logged, never turned into a failing exit status.
    Ok(ExitCode::SUCCESS)
}
