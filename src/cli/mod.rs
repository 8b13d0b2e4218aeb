//! CLI argument parsing for udiff.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Udiff: parse unified diffs from git, GNU diff and SVN.
///
/// Reads a diff from a file or stdin and reports the files, hunks and
/// lines it contains.
#[derive(Parser, Debug)]
#[command(name = "udiff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for udiff.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print change counts and one line per file.
    Summary(ParseArgs),

    /// Print the parsed diff as pretty JSON.
    ///
    /// Every file, hunk and line is included, along with the options
    /// the diff was parsed with.
    Dump(ParseArgs),

    /// Print a single file record, looked up by name.
    ///
    /// The first file whose old or new name contains NAME is shown.
    Show(ShowArgs),
}

/// Input and parse options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ParseArgs {
    /// Diff file to read, or `-` for stdin.
    pub input: String,

    /// YAML file with parse options. Flags below override its values.
    #[arg(long)]
    pub config: Option<String>,

    /// Input encoding label (utf-8, utf-16, latin-1, cp1252, shift_jis, ...).
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Extra prefix stripped from old-side file names.
    #[arg(long)]
    pub src_prefix: Option<String>,

    /// Extra prefix stripped from new-side file names.
    #[arg(long)]
    pub dst_prefix: Option<String>,

    /// Mark files with more added plus deleted lines as too big (0 disables).
    #[arg(long)]
    pub max_changes: Option<usize>,

    /// Mark files with a longer line as too big (0 disables).
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Header of the placeholder hunk of too-big files.
    #[arg(long)]
    pub too_big_message: Option<String>,

    /// Replace undecodable bytes with U+FFFD instead of failing.
    #[arg(long)]
    pub replace_invalid: bool,
}

/// Arguments for the `show` command.
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub parse: ParseArgs,

    /// Substring of the old or new file name.
    pub name: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
