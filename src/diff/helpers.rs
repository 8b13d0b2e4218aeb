//! Helper functions for diff parsing: filenames and hunk headers.

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::LazyLock;

/// Conventional one-letter prefixes of diff paths (git's `a/`, `b/`, and the
/// `i/ w/ c/ o/` variants of `diff.mnemonicPrefix`).
pub const BASE_FILENAME_PREFIXES: &[&str] = &["a/", "b/", "i/", "w/", "c/", "o/"];

/// GNU diff timestamp trailing a name, e.g. `2016-10-25 11:37:14.000000000 +0200`.
static TIMESTAMP_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:\.\d+)? [+-]\d{4}).*$")
        .expect("Invalid timestamp regex")
});

/// SVN revision marker trailing a name, e.g. `\t(revision 1234)`.
static SVN_REVISION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+\((?:revision \d+|working copy|nonexistent)\)\s*$")
        .expect("Invalid SVN revision regex")
});

static HUNK_HEADER_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@").expect("Invalid hunk header regex")
});

static HUNK_HEADER_COMBINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@@ -(\d+)(?:,\d+)? -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@@")
        .expect("Invalid combined hunk header regex")
});

/// A filename extracted from a header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ResolvedName {
    pub name: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// Extract a clean path from a raw header field.
///
/// When `header` is given (`"---"` or `"+++"`), `raw` must be that marker
/// followed by a space and the name. One layer of double quotes is removed,
/// then a trailing GNU timestamp or SVN revision marker, then exactly one
/// prefix: the first of [`BASE_FILENAME_PREFIXES`] (then `extra_prefix`)
/// the name starts with.
///
/// Returns `None` if `raw` does not have the expected shape or the name ends
/// up empty.
pub(super) fn resolve_filename(
    raw: &str,
    header: Option<&str>,
    extra_prefix: Option<&str>,
) -> Option<ResolvedName> {
    let field = match header {
        Some(marker) => raw.strip_prefix(marker)?.strip_prefix(' ')?,
        None => raw,
    };
    if field.is_empty() {
        return None;
    }

    let mut name = match field.strip_prefix('"') {
        Some(rest) if !rest.is_empty() => rest,
        _ => field,
    };

    let mut timestamp = None;
    if let Some(caps) = TIMESTAMP_SUFFIX.captures(name) {
        timestamp = DateTime::parse_from_str(&caps[1], "%Y-%m-%d %H:%M:%S%.f %z").ok();
        name = &name[..caps.get(0).map_or(name.len(), |m| m.start())];
    }
    if let Some(m) = SVN_REVISION_SUFFIX.find(name) {
        name = &name[..m.start()];
    }

    let name = match name.strip_suffix('"') {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    };

    let name = BASE_FILENAME_PREFIXES
        .iter()
        .copied()
        .chain(extra_prefix)
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);

    if name.is_empty() {
        return None;
    }

    Some(ResolvedName {
        name: name.to_string(),
        timestamp,
    })
}

/// Remove one layer of surrounding double quotes, if present.
pub(super) fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|v| !v.is_empty())
        .unwrap_or(value)
}

/// Split the two paths of a `diff --git` header (text after `diff --git `).
///
/// Handles:
/// - `a/path b/path` (normal)
/// - `a/dir with space/f b/dir with space/f` (symmetric paths with spaces)
/// - `"a/quoted name" "b/quoted name"` (quoted)
/// - `a/old b/new` (rename, no spaces)
///
/// Ambiguous unquoted paths with spaces split at the last space.
pub(super) fn split_git_header(rest: &str) -> Option<(&str, &str)> {
    if let Some(quoted) = rest.strip_prefix('"') {
        if let Some(end) = quoted.find("\" ") {
            let old = &rest[..end + 2];
            let new = &rest[end + 3..];
            if !new.is_empty() {
                return Some((old, new));
            }
        }
    }

    let spaces: Vec<usize> = rest.match_indices(' ').map(|(i, _)| i).collect();

    for &i in &spaces {
        let (old, new) = (&rest[..i], &rest[i + 1..]);
        if new.starts_with('"') && !old.is_empty() {
            return Some((old, new));
        }
        if !old.is_empty() && strip_base_prefix(old) == strip_base_prefix(new) {
            return Some((old, new));
        }
    }

    let &last = spaces.iter().rev().find(|&&i| i > 0 && i + 1 < rest.len())?;
    Some((&rest[..last], &rest[last + 1..]))
}

fn strip_base_prefix(name: &str) -> &str {
    BASE_FILENAME_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
}

/// A recognised (or not) hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HunkHeader {
    /// `@@ -a[,b] +c[,d] @@`
    Single { old_start: u32, new_start: u32 },
    /// `@@@ -a[,b] -c[,d] +e[,f] @@@`
    Combined {
        old_start: u32,
        old_start_secondary: u32,
        new_start: u32,
    },
    /// Anything else; opens a hunk at offset 0.
    Unrecognized,
}

/// Classify a hunk header line and extract its start offsets.
///
/// Line counts are ignored; line numbers are tracked per line instead.
pub(super) fn parse_hunk_header(line: &str) -> HunkHeader {
    if let Some(caps) = HUNK_HEADER_SINGLE.captures(line) {
        if let (Ok(old_start), Ok(new_start)) = (caps[1].parse(), caps[2].parse()) {
            return HunkHeader::Single { old_start, new_start };
        }
    } else if let Some(caps) = HUNK_HEADER_COMBINED.captures(line) {
        if let (Ok(old_start), Ok(old_start_secondary), Ok(new_start)) =
            (caps[1].parse(), caps[2].parse(), caps[3].parse())
        {
            return HunkHeader::Combined {
                old_start,
                old_start_secondary,
                new_start,
            };
        }
    }

    HunkHeader::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(raw: &str, header: Option<&str>, extra: Option<&str>) -> Option<String> {
        resolve_filename(raw, header, extra).map(|r| r.name)
    }

    #[test]
    fn test_resolve_strips_one_base_prefix() {
        assert_eq!(name_of("--- a/src/lib.rs", Some("---"), None).as_deref(), Some("src/lib.rs"));
        assert_eq!(name_of("+++ b/b/nested.rs", Some("+++"), None).as_deref(), Some("b/nested.rs"));
        assert_eq!(name_of("plain.txt", None, None).as_deref(), Some("plain.txt"));
    }

    #[test]
    fn test_resolve_extra_prefix_only_when_no_base_prefix() {
        assert_eq!(name_of("--- pre/x.rs", Some("---"), Some("pre/")).as_deref(), Some("x.rs"));
        assert_eq!(
            name_of("--- a/pre/x.rs", Some("---"), Some("pre/")).as_deref(),
            Some("pre/x.rs")
        );
    }

    #[test]
    fn test_resolve_quoted_name() {
        assert_eq!(
            name_of("--- \"a/with space.txt\"", Some("---"), None).as_deref(),
            Some("with space.txt")
        );
    }

    #[test]
    fn test_resolve_captures_gnu_timestamp() {
        let resolved = resolve_filename(
            "+++ b/file.txt\t2016-10-25 11:37:14.000000000 +0200",
            Some("+++"),
            None,
        )
        .unwrap();
        assert_eq!(resolved.name, "file.txt");
        assert_eq!(
            resolved.timestamp,
            Some(DateTime::parse_from_rfc3339("2016-10-25T11:37:14+02:00").unwrap())
        );
    }

    #[test]
    fn test_resolve_strips_svn_markers() {
        assert_eq!(
            name_of("--- src/main.c\t(revision 1234)", Some("---"), None).as_deref(),
            Some("src/main.c")
        );
        assert_eq!(
            name_of("+++ src/main.c\t(working copy)", Some("+++"), None).as_deref(),
            Some("src/main.c")
        );
    }

    #[test]
    fn test_resolve_rejects_malformed_fields() {
        assert_eq!(name_of("--- ", Some("---"), None), None);
        assert_eq!(name_of("+++x", Some("+++"), None), None);
        assert_eq!(name_of("--- a/", Some("---"), None), None);
    }

    #[test]
    fn test_split_git_header() {
        assert_eq!(split_git_header("a/x.rs b/x.rs"), Some(("a/x.rs", "b/x.rs")));
        assert_eq!(
            split_git_header("a/dir with space/f b/dir with space/f"),
            Some(("a/dir with space/f", "b/dir with space/f"))
        );
        assert_eq!(
            split_git_header("\"a/q name\" \"b/q name\""),
            Some(("\"a/q name\"", "\"b/q name\""))
        );
        assert_eq!(split_git_header("a/old b/new"), Some(("a/old", "b/new")));
        assert_eq!(split_git_header("nospace"), None);
    }

    #[test]
    fn test_parse_hunk_header() {
        assert_eq!(
            parse_hunk_header("@@ -1,7 +1,8 @@ fn main()"),
            HunkHeader::Single { old_start: 1, new_start: 1 }
        );
        assert_eq!(
            parse_hunk_header("@@ -0,0 +1 @@"),
            HunkHeader::Single { old_start: 0, new_start: 1 }
        );
        assert_eq!(
            parse_hunk_header("@@@ -98,20 -99,12 +100,20 @@@"),
            HunkHeader::Combined {
                old_start: 98,
                old_start_secondary: 99,
                new_start: 100,
            }
        );
        assert_eq!(parse_hunk_header("@@ @@"), HunkHeader::Unrecognized);
        assert_eq!(parse_hunk_header("@@ -abc +1 @@"), HunkHeader::Unrecognized);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a b\""), "a b");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"\""), "\"\"");
    }
}
