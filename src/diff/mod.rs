//! Unified diff parsing.
//!
//! Turns diff text into per-file change records. Supported inputs:
//! - git extended diffs (modes, renames, copies, similarity, binary markers)
//! - GNU `diff -u` output, including header timestamps
//! - SVN diffs with `Index:` banners and `(revision N)` markers
//! - combined (merge) diffs with `@@@` headers and two marker columns
//!
//! The parser is a single forward pass with short lookahead. It never fails on
//! malformed content: unknown lines are ignored, unrecognized hunk headers
//! start at line 0, and files that never get a destination name are dropped.

mod api;
mod dump;
mod helpers;
mod model;
mod parser;
mod patterns;


// Re-export public API
pub use api::{ParsedDiff, parse_bytes, parse_path, parse_str};
pub use helpers::BASE_FILENAME_PREFIXES;
pub use model::{DEV_NULL, FileDiff, FileStatus, Hunk, Line, LineKind, ParentValue, extension_of};
