//! Core diff parsing logic.
//!
//! A single forward pass over the normalized lines. Each line is dispatched by
//! the first rule that claims it:
//!
//! 1. blank lines and `*` markers are skipped;
//! 2. `diff ...` starts a new file;
//! 3. a file starts implicitly when none is open, or on a `--- / +++ / @@`
//!    triple in a non-git diff;
//! 4. lines of a truncated file are skipped;
//! 5. size limits truncate the current file;
//! 6. `--- ` and `+++ ` lines name the file (first resolution wins);
//! 7. `@@` lines open a hunk, as does any line of a git diff whose names are
//!    known while no hunk is open;
//! 8. `+`, `-` and ` ` lines inside a hunk are classified;
//! 9. everything else is matched against the extended header table.

use crate::config::ParseOptions;
use crate::error::{Result, UdiffError};
use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

use super::helpers::{HunkHeader, parse_hunk_header, resolve_filename, split_git_header};
use super::model::{FileDiff, Hunk, Line, LineKind, ParentValue};
use super::patterns::{
    ExtendedHeader, HUNK_HEADER_PREFIX, NEW_FILE_NAME_HEADER, OLD_FILE_NAME_HEADER,
    classify_line, match_extended_header,
};

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";
const BINARY_HUNK_HEADER: &str = "Binary file";

/// SVN log banners: ten or more `-` or `=`.
static SEPARATOR_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{10,}|={10,}").expect("Invalid separator regex"));

/// Strip decorations and unify line endings ahead of the line pass.
pub(crate) fn normalize(text: &str) -> String {
    let text = text
        .replace(NO_NEWLINE_MARKER, "")
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    SEPARATOR_RULE.replace_all(&text, "").into_owned()
}

/// Parse decoded diff text into file records.
///
/// # Arguments
///
/// * `text` - Unified diff text (git, GNU diff, SVN or combined)
/// * `options` - Prefixes and size limits
///
/// # Returns
///
/// * `Ok(Vec<FileDiff>)` - Committed files in input order
/// * `Err(UdiffError::MissingFileContext)` - The parser lost track of the current file
pub(crate) fn parse_text(text: &str, options: &ParseOptions) -> Result<Vec<FileDiff>> {
    let normalized = normalize(text);
    let mut parser = Parser::new(normalized.lines().collect(), options);

    for idx in 0..parser.lines.len() {
        parser.step(idx)?;
    }
    parser.commit_file();

    debug!("Parsed {} file(s)", parser.files.len());
    Ok(parser.files)
}

/// Running line numbers inside an open hunk.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    old: u32,
    new: u32,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    File(FileDiff),
    Hunk {
        file: FileDiff,
        hunk: Hunk,
        cursor: Cursor,
    },
}

struct Parser<'a> {
    lines: Vec<&'a str>,

    // =========================================================================
    // Options
    // =========================================================================
    src_prefix: Option<String>,
    dst_prefix: Option<String>,
    max_changes: Option<usize>,
    max_line_length: Option<usize>,
    too_big_message: String,

    // =========================================================================
    // State
    // =========================================================================
    phase: Phase,

    /// Names from the `diff --git` line, used when no header names the file.
    fallback_old_name: Option<String>,
    fallback_new_name: Option<String>,

    files: Vec<FileDiff>,
}

impl<'a> Parser<'a> {
    fn new(lines: Vec<&'a str>, options: &ParseOptions) -> Self {
        Self {
            lines,
            src_prefix: options.src_prefix.clone(),
            dst_prefix: options.dst_prefix.clone(),
            max_changes: options.max_changes(),
            max_line_length: options.max_line_length(),
            too_big_message: options.too_big_message().to_string(),
            phase: Phase::Idle,
            fallback_old_name: None,
            fallback_new_name: None,
            files: Vec::new(),
        }
    }

    fn line_at(&self, idx: usize) -> &'a str {
        self.lines.get(idx).copied().unwrap_or("")
    }

    fn file(&self) -> Option<&FileDiff> {
        match &self.phase {
            Phase::Idle => None,
            Phase::File(file) | Phase::Hunk { file, .. } => Some(file),
        }
    }

    fn file_mut(&mut self) -> Option<&mut FileDiff> {
        match &mut self.phase {
            Phase::Idle => None,
            Phase::File(file) | Phase::Hunk { file, .. } => Some(file),
        }
    }

    /// Handle the line at `idx`.
    fn step(&mut self, idx: usize) -> Result<()> {
        let line = self.lines[idx];
        let missing_file = || UdiffError::MissingFileContext { line: idx + 1 };

        if line.is_empty() || line.starts_with('*') {
            return Ok(());
        }

        let prev_line = idx.checked_sub(1).map_or("", |i| self.line_at(i));
        let next_line = self.line_at(idx + 1);
        let after_next_line = self.line_at(idx + 2);

        if line.starts_with("diff") {
            self.start_file();

            if let Some((old, new)) = line.strip_prefix("diff --git ").and_then(split_git_header) {
                self.fallback_old_name =
                    resolve_filename(old, None, self.src_prefix.as_deref()).map(|r| r.name);
                self.fallback_new_name =
                    resolve_filename(new, None, self.dst_prefix.as_deref()).map(|r| r.name);
            }

            let file = self.file_mut().ok_or_else(missing_file)?;
            file.is_git_diff = true;
            debug!("Line {}: new file record", idx + 1);
            return Ok(());
        }

        let starts_file = match self.file() {
            None => true,
            Some(file) => {
                !file.is_git_diff
                    && line.starts_with(OLD_FILE_NAME_HEADER)
                    && next_line.starts_with(NEW_FILE_NAME_HEADER)
                    && after_next_line.starts_with(HUNK_HEADER_PREFIX)
            }
        };
        if starts_file {
            self.start_file();
        }

        let file = self.file().ok_or_else(missing_file)?;
        if file.is_too_big {
            return Ok(());
        }
        if self.exceeds_limits(file, line) {
            self.truncate(idx);
            return Ok(());
        }

        if self.resolve_header_name(line, prev_line, next_line) {
            return Ok(());
        }

        let (in_hunk, names_known) = match &self.phase {
            Phase::Hunk { .. } => (true, false),
            Phase::File(file) => (
                false,
                file.is_git_diff && file.old_name.is_some() && file.new_name.is_some(),
            ),
            Phase::Idle => (false, false),
        };

        if line.starts_with(HUNK_HEADER_PREFIX) || names_known {
            self.open_hunk(line);
            return Ok(());
        }

        if in_hunk && (line.starts_with('+') || line.starts_with('-') || line.starts_with(' ')) {
            self.push_line(line);
            return Ok(());
        }

        if let Some(header) = match_extended_header(line) {
            self.apply_extended_header(idx, line, header);
        }
        Ok(())
    }

    fn exceeds_limits(&self, file: &FileDiff, line: &str) -> bool {
        let changes = file.added_lines + file.deleted_lines;
        self.max_changes.is_some_and(|max| changes > max)
            || self
                .max_line_length
                .is_some_and(|max| line.chars().count() > max)
    }

    /// Resolve a `--- `/`+++ ` line paired with its counterpart.
    ///
    /// Returns true if the line named the file.
    fn resolve_header_name(&mut self, line: &str, prev_line: &str, next_line: &str) -> bool {
        let is_old = line.starts_with(OLD_FILE_NAME_HEADER) && next_line.starts_with(NEW_FILE_NAME_HEADER);
        let is_new = line.starts_with(NEW_FILE_NAME_HEADER) && prev_line.starts_with(OLD_FILE_NAME_HEADER);

        if is_old {
            let resolved = resolve_filename(line, Some("---"), self.src_prefix.as_deref());
            if let (Some(resolved), Some(file)) = (resolved, self.file_mut()) {
                if file.old_name.is_none() {
                    file.set_old_name(resolved.name);
                    file.old_timestamp = resolved.timestamp;
                    return true;
                }
            }
        } else if is_new {
            let resolved = resolve_filename(line, Some("+++"), self.dst_prefix.as_deref());
            if let (Some(resolved), Some(file)) = (resolved, self.file_mut()) {
                if file.new_name.is_none() {
                    file.set_new_name(resolved.name);
                    file.new_timestamp = resolved.timestamp;
                    return true;
                }
            }
        }

        false
    }

    /// True if a `--- / +++ / @@` triple appears at or after `idx` before the
    /// next `diff` line.
    fn hunk_header_follows(&self, idx: usize) -> bool {
        for (i, line) in self.lines.iter().enumerate().skip(idx) {
            if i > idx && line.starts_with("diff") {
                return false;
            }
            if line.starts_with(OLD_FILE_NAME_HEADER)
                && self.line_at(i + 1).starts_with(NEW_FILE_NAME_HEADER)
                && self.line_at(i + 2).starts_with(HUNK_HEADER_PREFIX)
            {
                return true;
            }
        }
        false
    }

    fn apply_extended_header(&mut self, idx: usize, line: &str, header: ExtendedHeader) {
        let explicit_names = matches!(
            header,
            ExtendedHeader::CopyFrom(_)
                | ExtendedHeader::CopyTo(_)
                | ExtendedHeader::RenameFrom(_)
                | ExtendedHeader::RenameTo(_)
        ) && self.hunk_header_follows(idx);

        let (src_prefix, dst_prefix) = (self.src_prefix.clone(), self.dst_prefix.clone());
        let Some(file) = self.file_mut() else {
            return;
        };

        match header {
            ExtendedHeader::OldMode(mode) => file.old_mode = Some(ParentValue::Single(mode)),
            ExtendedHeader::NewMode(mode) => file.new_mode = Some(ParentValue::Single(mode)),
            ExtendedHeader::DeletedFileMode(mode) => {
                file.deleted_file_mode = Some(ParentValue::Single(mode));
                file.is_deleted = true;
            }
            ExtendedHeader::CombinedDeletedFileMode(first, second) => {
                file.deleted_file_mode = Some(ParentValue::Combined(first, second));
                file.is_deleted = true;
            }
            ExtendedHeader::NewFileMode(mode) => {
                file.new_file_mode = Some(ParentValue::Single(mode));
                file.is_new = true;
            }
            ExtendedHeader::CopyFrom(name) => {
                if !explicit_names {
                    file.set_old_name(name);
                }
                file.is_copy = true;
            }
            ExtendedHeader::CopyTo(name) => {
                if !explicit_names {
                    file.set_new_name(name);
                }
                file.is_copy = true;
            }
            ExtendedHeader::RenameFrom(name) => {
                if !explicit_names {
                    file.set_old_name(name);
                }
                file.is_rename = true;
            }
            ExtendedHeader::RenameTo(name) => {
                if !explicit_names {
                    file.set_new_name(name);
                }
                file.is_rename = true;
            }
            ExtendedHeader::SimilarityIndex(percent) => file.unchanged_percentage = percent,
            ExtendedHeader::DissimilarityIndex(percent) => file.changed_percentage = percent,
            ExtendedHeader::Index { before, after, mode } => {
                file.checksum_before = Some(ParentValue::Single(before));
                file.checksum_after = Some(after);
                if mode.is_some() {
                    file.mode = mode;
                }
            }
            ExtendedHeader::CombinedIndex { before, after } => {
                file.checksum_before = Some(ParentValue::Combined(before.0, before.1));
                file.checksum_after = Some(after);
            }
            ExtendedHeader::CombinedMode { before, after } => {
                file.old_mode = Some(ParentValue::Combined(before.0, before.1));
                file.new_mode = Some(ParentValue::Single(after));
            }
            ExtendedHeader::BinaryFiles { old, new } => {
                file.is_binary = true;
                if let Some(resolved) = resolve_filename(&old, None, src_prefix.as_deref()) {
                    file.set_old_name(resolved.name);
                }
                if let Some(resolved) = resolve_filename(&new, None, dst_prefix.as_deref()) {
                    file.set_new_name(resolved.name);
                }
                self.open_hunk(BINARY_HUNK_HEADER);
            }
            ExtendedHeader::BinaryPatch => {
                file.is_binary = true;
                self.open_hunk(line);
            }
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Move the open hunk, if any, into its file.
    fn close_hunk(&mut self) {
        self.phase = match std::mem::take(&mut self.phase) {
            Phase::Hunk { mut file, hunk, .. } => {
                file.push_hunk(hunk);
                Phase::File(file)
            }
            phase => phase,
        };
    }

    /// Finish the current file and append it if it has a destination name.
    ///
    /// The change limit is checked once more here, so a file whose final
    /// line pushes it over `diff_max_changes` is truncated too.
    fn commit_file(&mut self) {
        self.close_hunk();
        let fallback_old = self.fallback_old_name.take();
        let fallback_new = self.fallback_new_name.take();

        let Phase::File(mut file) = std::mem::take(&mut self.phase) else {
            return;
        };

        if file.old_name.is_none() {
            if let Some(name) = fallback_old {
                file.set_old_name(name);
            }
        }
        if file.new_name.is_none() {
            if let Some(name) = fallback_new {
                file.set_new_name(name);
            }
        }

        if !file.is_too_big && self.exceeds_limits(&file, "") {
            info!("'{}' exceeds the change limit, truncating", file.display_name());
            file.truncate(&self.too_big_message);
        }

        if file.new_name.as_deref().is_some_and(|name| !name.is_empty()) {
            self.files.push(file);
        } else {
            debug!("Dropping file record without a destination name");
        }
    }

    fn start_file(&mut self) {
        self.commit_file();
        self.phase = Phase::File(FileDiff::default());
    }

    /// Open a hunk on the current file, closing the previous one.
    fn open_hunk(&mut self, header: &str) {
        self.close_hunk();
        let Phase::File(mut file) = std::mem::take(&mut self.phase) else {
            return;
        };

        let hunk = match parse_hunk_header(header) {
            HunkHeader::Single { old_start, new_start } => {
                file.is_combined = false;
                Hunk::new(header, old_start, None, new_start)
            }
            HunkHeader::Combined {
                old_start,
                old_start_secondary,
                new_start,
            } => {
                file.is_combined = true;
                Hunk::new(header, old_start, Some(old_start_secondary), new_start)
            }
            HunkHeader::Unrecognized => {
                if header.starts_with(HUNK_HEADER_PREFIX) {
                    warn!("Unrecognized hunk header '{}', starting at line 0", header);
                } else {
                    debug!("Opening hunk on '{}'", header);
                }
                file.is_combined = false;
                Hunk::new(header, 0, None, 0)
            }
        };

        let cursor = Cursor {
            old: hunk.old_start,
            new: hunk.new_start,
        };
        self.phase = Phase::Hunk { file, hunk, cursor };
    }

    /// Classify a hunk line and advance the cursors.
    fn push_line(&mut self, raw: &str) {
        let Phase::Hunk { file, hunk, cursor } = &mut self.phase else {
            return;
        };

        let (kind, content) = classify_line(raw, file.is_combined);
        let marker = &raw[..raw.len() - content.len()];
        let line = match kind {
            LineKind::Added => {
                file.added_lines += 1;
                let line = Line::added(content, cursor.new);
                cursor.new = cursor.new.saturating_add(1);
                line
            }
            LineKind::Removed => {
                file.deleted_lines += 1;
                let line = Line::removed(content, cursor.old);
                cursor.old = cursor.old.saturating_add(1);
                line
            }
            LineKind::Context => {
                let line = Line::context(content, cursor.old, cursor.new);
                cursor.old = cursor.old.saturating_add(1);
                cursor.new = cursor.new.saturating_add(1);
                line
            }
        };
        hunk.push(line.with_marker(marker));
    }

    /// Replace the current file's content with the too-big placeholder.
    fn truncate(&mut self, idx: usize) {
        let mut file = match std::mem::take(&mut self.phase) {
            Phase::Idle => return,
            Phase::File(file) | Phase::Hunk { file, .. } => file,
        };
        info!(
            "Line {}: '{}' exceeds the size limits, truncating",
            idx + 1,
            file.display_name()
        );
        file.truncate(&self.too_big_message);
        self.phase = Phase::File(file);
    }
}
