//! `f1-etl`: build the racing warehouse from CSV extracts.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use f1_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_etl, run_tables};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match dispatch(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Command) -> Result<ExitCode> {
    match command {
        Command::Run(args) => {
            let outcome = run_etl(&args)?;
            print_summary(&outcome);
            if args.print_manifest {
                println!("{}", outcome.manifest.to_json()?);
            }
            Ok(if outcome.has_errors() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Tables => {
            run_tables()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
