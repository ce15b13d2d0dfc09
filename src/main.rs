//! `locksmith-strategy` command-line entry point.
use std::io;
use std::process::ExitCode;

use clap::Parser;
use locksmith_strategy::{cli, commands, logging};

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    let result = match args.command {
        cli::Command::Apply(opts) => commands::apply::run(&args.global, &opts, &log),
        cli::Command::Status(opts) => {
            commands::status::run(&args.global, &opts, &log, &mut io::stdout().lock())
        }
        cli::Command::Version => commands::version::run(&mut io::stdout().lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
