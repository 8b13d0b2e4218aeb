//! Command implementations for udiff.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the input handling they share.

mod dump;
mod input;
mod show;
mod summary;

use crate::cli::Command;
use udiff::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Summary(args) => summary::cmd_summary(args),
        Command::Dump(args) => dump::cmd_dump(args),
        Command::Show(args) => show::cmd_show(args),
    }
}
