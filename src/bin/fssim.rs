//! fssim CLI Binary
//!
//! Runs one subcommand against the workspace snapshot, or the interactive
//! shell when no subcommand is given.

use anyhow::Context;
use clap::Parser;
use fssim::logging::init_logging;
use fssim::tooling::cli::{Cli, CliContext, Commands};
use std::process;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let context = CliContext::new(cli.workspace.clone(), cli.config.clone())
        .context("initializing workspace")?;

    let logging = context.config().logging.clone().with_overrides(
        cli.log_level.as_deref(),
        cli.log_format.as_deref(),
        cli.log_output.as_deref(),
        cli.log_file.clone(),
    );
    init_logging(Some(&logging)).context("initializing logging")?;

    let command = cli.command.unwrap_or(Commands::Shell);
    let output = context.execute(&command)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
