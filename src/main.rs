//! Udiff: parse unified diffs from git, GNU diff and SVN.
//!
//! The command line front end over the `udiff` library. It reads a diff
//! from a file or stdin and prints a summary, a JSON dump, or one file.

mod cli;
mod commands;

use cli::Cli;
use log::LevelFilter;
use std::process::ExitCode;
use udiff::exit_codes;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(cli.verbose, cli.quiet);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Initialize logging based on verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp(None)
        .init();
}
