//! udiff - a unified diff parser.
//!
//! Parses git, GNU `diff -u`, SVN and combined (merge) diffs into
//! [`ParsedDiff`] collections of [`FileDiff`] records with their hunks and
//! numbered lines.
//!
//! ```no_run
//! use udiff::{ParseOptions, parse_str};
//!
//! let text = std::fs::read_to_string("changes.diff")?;
//! let diff = parse_str(&text, &ParseOptions::default())?;
//! for file in &diff {
//!     println!("{} +{} -{}", file.display_name(), file.added_lines, file.deleted_lines);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod diff;
pub mod encoding;
pub mod error;
pub mod exit_codes;

pub use config::{DecodeErrors, ParseOptions};
pub use diff::{
    FileDiff, FileStatus, Hunk, Line, LineKind, ParentValue, ParsedDiff, parse_bytes, parse_path,
    parse_str,
};
pub use encoding::Encoding;
pub use error::{Result, UdiffError};
