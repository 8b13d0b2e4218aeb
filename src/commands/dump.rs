//! Implementation of the `udiff dump` command.

use super::input::load_diff;
use crate::cli::ParseArgs;
use udiff::ParsedDiff;
use udiff::error::{Result, UdiffError};

/// Execute the `udiff dump` command.
///
/// Prints every file, hunk and line as pretty JSON.
pub fn cmd_dump(args: ParseArgs) -> Result<()> {
    let diff = load_diff(&args)?;
    println!("{}", render_dump(&diff)?);
    Ok(())
}

fn render_dump(diff: &ParsedDiff) -> Result<String> {
    serde_json::to_string_pretty(&diff.dump())
        .map_err(|e| UdiffError::UserError(format!("failed to render JSON: {}", e)))
}
