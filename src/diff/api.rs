//! Public API for diff parsing.

use crate::config::ParseOptions;
use crate::encoding::Encoding;
use crate::error::{Result, UdiffError};
use std::fmt;
use std::ops::Index;
use std::path::Path;

use super::model::FileDiff;
use super::parser::parse_text;

/// The files of a parsed diff, in input order, with the options used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDiff {
    files: Vec<FileDiff>,
    options: ParseOptions,
}

impl ParsedDiff {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileDiff> {
        self.files.iter()
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }

    pub fn get(&self, index: usize) -> Option<&FileDiff> {
        self.files.get(index)
    }

    /// First file whose old or new name contains `name`.
    ///
    /// This is a substring match: `"init.js"` also finds `src/core/init.js`,
    /// and a short needle may hit an unrelated longer path.
    pub fn get_by_name(&self, name: &str) -> Option<&FileDiff> {
        self.files.iter().find(|file| file.matches_name(name))
    }

    pub fn added_files(&self) -> Vec<&FileDiff> {
        self.files.iter().filter(|f| f.is_added_file()).collect()
    }

    pub fn removed_files(&self) -> Vec<&FileDiff> {
        self.files.iter().filter(|f| f.is_removed_file()).collect()
    }

    pub fn modified_files(&self) -> Vec<&FileDiff> {
        self.files.iter().filter(|f| f.is_modified_file()).collect()
    }

    /// Number of created files.
    pub fn added(&self) -> usize {
        self.files.iter().filter(|f| f.is_added_file()).count()
    }

    /// Number of deleted files.
    pub fn removed(&self) -> usize {
        self.files.iter().filter(|f| f.is_removed_file()).count()
    }

    /// Number of files that were neither created nor deleted.
    pub fn modified(&self) -> usize {
        self.files.iter().filter(|f| f.is_modified_file()).count()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn into_files(self) -> Vec<FileDiff> {
        self.files
    }
}

impl Index<usize> for ParsedDiff {
    type Output = FileDiff;

    fn index(&self, index: usize) -> &FileDiff {
        &self.files[index]
    }
}

impl<'a> IntoIterator for &'a ParsedDiff {
    type Item = &'a FileDiff;
    type IntoIter = std::slice::Iter<'a, FileDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl fmt::Display for ParsedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ParsedDiff (added {}, removed {}, modified {})",
            self.added(),
            self.removed(),
            self.modified()
        )?;
        for file in &self.files {
            write!(f, "\n{}", file)?;
        }
        Ok(())
    }
}

/// Parse already-decoded diff text.
///
/// # Arguments
///
/// * `text` - Unified diff text
/// * `options` - Prefixes and size limits; `encoding` is not consulted
///
/// # Returns
///
/// * `Ok(ParsedDiff)` - The files found, possibly none
/// * `Err(UdiffError::MissingFileContext)` - Structural parse failure
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<ParsedDiff> {
    let files = parse_text(text, options)?;
    Ok(ParsedDiff {
        files,
        options: options.clone(),
    })
}

/// Decode raw bytes with `options.encoding` (UTF-8 by default), then parse.
///
/// # Returns
///
/// * `Ok(ParsedDiff)` - The files found
/// * `Err(UdiffError::UnknownEncoding)` - The encoding label is not supported
/// * `Err(UdiffError::Decode)` - The bytes are invalid and decoding is strict
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<ParsedDiff> {
    let encoding = options.resolved_encoding()?;
    let text = encoding.decode(bytes, options.decode_errors)?;
    parse_str(&text, options)
}

/// Read a diff file, decode it with `encoding` and parse it.
///
/// `encoding` takes precedence over `options.encoding`.
///
/// # Returns
///
/// * `Ok(ParsedDiff)` - The files found
/// * `Err(UdiffError::Io)` - The file could not be read
/// * `Err(UdiffError::Decode)` - The content is invalid in `encoding`
pub fn parse_path<P: AsRef<Path>>(
    path: P,
    encoding: Encoding,
    options: &ParseOptions,
) -> Result<ParsedDiff> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| UdiffError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = encoding.decode(&bytes, options.decode_errors)?;
    parse_str(&text, options)
}
