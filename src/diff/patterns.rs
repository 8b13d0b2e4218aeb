//! Line classification and the extended-header pattern table.
//!
//! Git (and combined/merge) diffs carry metadata lines between the
//! `diff --git` line and the first hunk: modes, renames, copies, similarity,
//! blob hashes and binary markers. Each kind is a variant of
//! [`ExtendedHeader`]; [`match_extended_header`] tries an ordered table of
//! `(pattern, constructor)` pairs once per line and returns the first hit.

use super::helpers::unquote;
use super::model::LineKind;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const OLD_FILE_NAME_HEADER: &str = "--- ";
pub const NEW_FILE_NAME_HEADER: &str = "+++ ";
pub const HUNK_HEADER_PREFIX: &str = "@@";

/// Metadata carried by one extended header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ExtendedHeader {
    OldMode(String),
    NewMode(String),
    DeletedFileMode(String),
    CombinedDeletedFileMode(String, String),
    NewFileMode(String),
    CopyFrom(String),
    CopyTo(String),
    RenameFrom(String),
    RenameTo(String),
    SimilarityIndex(u32),
    DissimilarityIndex(u32),
    Index {
        before: String,
        after: String,
        mode: Option<String>,
    },
    CombinedIndex {
        before: (String, String),
        after: String,
    },
    CombinedMode {
        before: (String, String),
        after: String,
    },
    BinaryFiles {
        old: String,
        new: String,
    },
    BinaryPatch,
}

type Constructor = fn(&Captures<'_>) -> Option<ExtendedHeader>;

fn text(caps: &Captures<'_>, group: usize) -> String {
    caps[group].to_string()
}

fn path(caps: &Captures<'_>, group: usize) -> String {
    unquote(&caps[group]).to_string()
}

/// Ordered header table. Combined variants precede the single-parent patterns
/// they would otherwise be shadowed by.
static HEADER_PATTERNS: LazyLock<Vec<(Regex, Constructor)>> = LazyLock::new(|| {
    let table: Vec<(&str, Constructor)> = vec![
        (r"^old mode (\d{6})", |c| Some(ExtendedHeader::OldMode(text(c, 1)))),
        (r"^new mode (\d{6})", |c| Some(ExtendedHeader::NewMode(text(c, 1)))),
        (r"^deleted file mode (\d{6}),(\d{6})", |c| {
            Some(ExtendedHeader::CombinedDeletedFileMode(text(c, 1), text(c, 2)))
        }),
        (r"^deleted file mode (\d{6})", |c| {
            Some(ExtendedHeader::DeletedFileMode(text(c, 1)))
        }),
        // Combined diffs use the same form for created files.
        (r"^new file mode (\d{6})", |c| Some(ExtendedHeader::NewFileMode(text(c, 1)))),
        (r"^copy from (.+)", |c| Some(ExtendedHeader::CopyFrom(path(c, 1)))),
        (r"^copy to (.+)", |c| Some(ExtendedHeader::CopyTo(path(c, 1)))),
        (r"^rename from (.+)", |c| Some(ExtendedHeader::RenameFrom(path(c, 1)))),
        (r"^rename to (.+)", |c| Some(ExtendedHeader::RenameTo(path(c, 1)))),
        (r"^similarity index (\d+)%", |c| {
            c[1].parse().ok().map(ExtendedHeader::SimilarityIndex)
        }),
        (r"^dissimilarity index (\d+)%", |c| {
            c[1].parse().ok().map(ExtendedHeader::DissimilarityIndex)
        }),
        (r"^index ([\da-z]+),([\da-z]+)\.\.([\da-z]+)", |c| {
            Some(ExtendedHeader::CombinedIndex {
                before: (text(c, 1), text(c, 2)),
                after: text(c, 3),
            })
        }),
        (r"^index ([\da-z]+)\.\.([\da-z]+)\s*(\d{6})?", |c| {
            Some(ExtendedHeader::Index {
                before: text(c, 1),
                after: text(c, 2),
                mode: c.get(3).map(|m| m.as_str().to_string()),
            })
        }),
        (r"^mode (\d{6}),(\d{6})\.\.(\d{6})", |c| {
            Some(ExtendedHeader::CombinedMode {
                before: (text(c, 1), text(c, 2)),
                after: text(c, 3),
            })
        }),
        (r"^Binary files (.*) and (.*) differ", |c| {
            Some(ExtendedHeader::BinaryFiles {
                old: text(c, 1),
                new: text(c, 2),
            })
        }),
        (r"^GIT binary patch", |_| Some(ExtendedHeader::BinaryPatch)),
    ];

    table
        .into_iter()
        .map(|(pattern, build)| {
            (
                Regex::new(pattern).expect("Invalid extended header regex"),
                build,
            )
        })
        .collect()
});

/// Match `line` against the extended header table.
pub(super) fn match_extended_header(line: &str) -> Option<ExtendedHeader> {
    HEADER_PATTERNS
        .iter()
        .find_map(|(regex, build)| regex.captures(line).and_then(|caps| build(&caps)))
}

/// Classify a hunk body line and return it without its marker column(s).
///
/// Combined diffs have one marker column per parent: `++`, `+ ` and ` +` are
/// additions, `--`, `- ` and ` -` removals. Plain diffs use one column.
/// Anything unrecognised is context.
pub(super) fn classify_line(line: &str, combined: bool) -> (LineKind, &str) {
    let (added, removed, width): (&[&str], &[&str], usize) = if combined {
        (&["++", "+ ", " +"], &["--", "- ", " -"], 2)
    } else {
        (&["+"], &["-"], 1)
    };

    let kind = if added.iter().any(|p| line.starts_with(p)) {
        LineKind::Added
    } else if removed.iter().any(|p| line.starts_with(p)) {
        LineKind::Removed
    } else {
        LineKind::Context
    };

    let content = line
        .char_indices()
        .nth(width)
        .map_or("", |(offset, _)| &line[offset..]);

    (kind, content)
}
