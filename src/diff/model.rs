//! Records produced by the parser: lines, hunks and per-file changes.

use chrono::{DateTime, FixedOffset};
use std::fmt;

/// Placeholder name used by diff tools for the missing side of a creation or deletion.
pub const DEV_NULL: &str = "/dev/null";

/// Classification of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Added,
    Removed,
    Context,
}

impl LineKind {
    /// The single-column marker a plain unified diff uses for this kind.
    pub fn marker(self) -> char {
        match self {
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::Context => ' ',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Added => "added",
            LineKind::Removed => "removed",
            LineKind::Context => "context",
        }
    }
}

/// One classified line of a hunk.
///
/// `content` excludes the marker column(s): one for plain diffs, two for
/// combined diffs. The columns are kept in `marker`, so [`Line::raw`] gives
/// back the line exactly as it appeared in the hunk. Added lines carry only a
/// target line number, removed lines only a source line number, context
/// lines both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: String,
    marker: String,
    kind: LineKind,
    source_line_no: Option<u32>,
    target_line_no: Option<u32>,
}

impl Line {
    pub(crate) fn added(content: impl Into<String>, target_line_no: u32) -> Self {
        Self {
            content: content.into(),
            marker: LineKind::Added.marker().to_string(),
            kind: LineKind::Added,
            source_line_no: None,
            target_line_no: Some(target_line_no),
        }
    }

    pub(crate) fn removed(content: impl Into<String>, source_line_no: u32) -> Self {
        Self {
            content: content.into(),
            marker: LineKind::Removed.marker().to_string(),
            kind: LineKind::Removed,
            source_line_no: Some(source_line_no),
            target_line_no: None,
        }
    }

    pub(crate) fn context(content: impl Into<String>, source_line_no: u32, target_line_no: u32) -> Self {
        Self {
            content: content.into(),
            marker: LineKind::Context.marker().to_string(),
            kind: LineKind::Context,
            source_line_no: Some(source_line_no),
            target_line_no: Some(target_line_no),
        }
    }

    /// Replace the default one-column marker with the columns actually read.
    pub(crate) fn with_marker(mut self, marker: &str) -> Self {
        self.marker = marker.to_string();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The marker column(s) stripped from the line, e.g. `+` or ` -`.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// The line as it appeared in the hunk, marker included.
    pub fn raw(&self) -> String {
        format!("{}{}", self.marker, self.content)
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Line number in the old revision, absent for added lines.
    pub fn source_line_no(&self) -> Option<u32> {
        self.source_line_no
    }

    /// Line number in the new revision, absent for removed lines.
    pub fn target_line_no(&self) -> Option<u32> {
        self.target_line_no
    }

    pub fn is_added(&self) -> bool {
        self.kind == LineKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == LineKind::Removed
    }

    pub fn is_context(&self) -> bool {
        self.kind == LineKind::Context
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.marker, self.content)
    }
}

/// A contiguous block of lines under one `@@ ... @@` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// The raw header line (or placeholder text for binary and oversized files).
    pub header: String,

    /// First line number in the old revision.
    pub old_start: u32,

    /// First line number in the second parent; only set for combined diffs.
    pub old_start_secondary: Option<u32>,

    /// First line number in the new revision.
    pub new_start: u32,

    lines: Vec<Line>,
}

impl Hunk {
    pub(crate) fn new(
        header: impl Into<String>,
        old_start: u32,
        old_start_secondary: Option<u32>,
        new_start: u32,
    ) -> Self {
        Self {
            header: header.into(),
            old_start,
            old_start_secondary,
            new_start,
            lines: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of added lines in this hunk.
    pub fn added(&self) -> usize {
        self.count(LineKind::Added)
    }

    /// Number of removed lines in this hunk.
    pub fn removed(&self) -> usize {
        self.count(LineKind::Removed)
    }

    /// Number of context lines in this hunk.
    pub fn context(&self) -> usize {
        self.count(LineKind::Context)
    }

    fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a Hunk {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, added {}, removed {}, context {}",
            self.header,
            self.added(),
            self.removed(),
            self.context()
        )
    }
}

/// A header value that is either single or given once per merge parent.
///
/// Combined (merge) diffs report modes and blob hashes for both parents,
/// e.g. `index fabadb8,cc95eb0..4866510`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentValue {
    Single(String),
    Combined(String, String),
}

impl ParentValue {
    /// The value, if this is not a combined-diff pair.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParentValue::Single(v) => Some(v),
            ParentValue::Combined(..) => None,
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, ParentValue::Combined(..))
    }
}

impl fmt::Display for ParentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentValue::Single(v) => f.write_str(v),
            ParentValue::Combined(a, b) => write!(f, "{},{}", a, b),
        }
    }
}

/// Coarse classification of a file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Deleted,
    Modified,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Deleted => "deleted",
            FileStatus::Modified => "modified",
        }
    }
}

/// The change record of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiff {
    // =========================================================================
    // Identity
    // =========================================================================
    /// Name on the old side; `/dev/null` for created files.
    pub old_name: Option<String>,

    /// Name on the new side; `/dev/null` for deleted files.
    pub new_name: Option<String>,

    /// Text after the last `.` of the most recently resolved name.
    pub extension: String,

    /// Timestamp from a GNU diff `---` header, if one was present.
    pub old_timestamp: Option<DateTime<FixedOffset>>,

    /// Timestamp from a GNU diff `+++` header, if one was present.
    pub new_timestamp: Option<DateTime<FixedOffset>>,

    // =========================================================================
    // Status
    // =========================================================================
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_copy: bool,
    pub is_rename: bool,
    pub is_binary: bool,
    pub is_combined: bool,
    pub is_git_diff: bool,

    /// Content was replaced by a single placeholder hunk because of a size limit.
    pub is_too_big: bool,

    // =========================================================================
    // Modes
    // =========================================================================
    pub old_mode: Option<ParentValue>,
    pub new_mode: Option<ParentValue>,
    pub deleted_file_mode: Option<ParentValue>,
    pub new_file_mode: Option<ParentValue>,

    /// Mode trailing an `index` line (`index 1a2b3c4..5d6e7f8 100644`).
    pub mode: Option<String>,

    // =========================================================================
    // Similarity and content identity
    // =========================================================================
    /// From `similarity index N%`.
    pub unchanged_percentage: u32,

    /// From `dissimilarity index N%`.
    pub changed_percentage: u32,

    pub checksum_before: Option<ParentValue>,
    pub checksum_after: Option<String>,

    // =========================================================================
    // Running counters
    // =========================================================================
    pub added_lines: usize,
    pub deleted_lines: usize,

    hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hunk> {
        self.hunks.iter()
    }

    /// The new name if resolved, otherwise the old one.
    ///
    /// Deleted files report their old name rather than `/dev/null`.
    pub fn display_name(&self) -> &str {
        self.new_name
            .as_deref()
            .filter(|n| !n.is_empty() && *n != DEV_NULL)
            .or(self.old_name.as_deref())
            .unwrap_or("")
    }

    pub fn is_added_file(&self) -> bool {
        self.is_new
    }

    pub fn is_removed_file(&self) -> bool {
        self.is_deleted
    }

    pub fn is_modified_file(&self) -> bool {
        !self.is_new && !self.is_deleted
    }

    pub fn status(&self) -> FileStatus {
        if self.is_new {
            FileStatus::Added
        } else if self.is_deleted {
            FileStatus::Deleted
        } else {
            FileStatus::Modified
        }
    }

    /// True if either name contains `needle`.
    pub fn matches_name(&self, needle: &str) -> bool {
        [&self.old_name, &self.new_name]
            .into_iter()
            .flatten()
            .any(|name| !name.is_empty() && name.contains(needle))
    }

    pub(crate) fn set_old_name(&mut self, name: String) {
        self.update_extension(&name);
        self.old_name = Some(name);
    }

    pub(crate) fn set_new_name(&mut self, name: String) {
        self.update_extension(&name);
        self.new_name = Some(name);
    }

    fn update_extension(&mut self, name: &str) {
        if name != DEV_NULL {
            self.extension = extension_of(name).to_string();
        }
    }

    pub(crate) fn push_hunk(&mut self, hunk: Hunk) {
        self.hunks.push(hunk);
    }

    /// Drop all content and counters, leaving one placeholder hunk.
    pub(crate) fn truncate(&mut self, message: &str) {
        self.is_too_big = true;
        self.is_combined = false;
        self.added_lines = 0;
        self.deleted_lines = 0;
        self.hunks.clear();
        self.hunks.push(Hunk::new(message, 0, None, 0));
    }
}

impl<'a> IntoIterator for &'a FileDiff {
    type Item = &'a Hunk;
    type IntoIter = std::slice::Iter<'a, Hunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.hunks.iter()
    }
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FileDiff ({}, {})", self.display_name(), self.status().as_str())?;
        for hunk in &self.hunks {
            writeln!(f, "{}", hunk)?;
        }
        Ok(())
    }
}

/// Text after the final `.` of `name`, or an empty string.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}
