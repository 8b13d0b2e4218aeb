//! ParseOptions struct definition.

use super::types::DecodeErrors;
use serde::{Deserialize, Serialize};

/// Options recognised by the parser.
///
/// Every field is optional; `ParseOptions::default()` parses with no extra
/// prefixes, no size limits and strict UTF-8 decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    // =========================================================================
    // Decoding
    // =========================================================================
    /// Label of the encoding raw input bytes are decoded with (default: utf-8).
    /// Ignored by [`crate::parse_str`], which receives text directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Policy for bytes that are invalid in `encoding`.
    pub decode_errors: DecodeErrors,

    // =========================================================================
    // Filenames
    // =========================================================================
    /// Extra prefix stripped from old-side names, after `a/ b/ i/ w/ c/ o/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_prefix: Option<String>,

    /// Extra prefix stripped from new-side names, after `a/ b/ i/ w/ c/ o/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_prefix: Option<String>,

    // =========================================================================
    // Size limits
    // =========================================================================
    /// Number of added plus deleted lines after which a file is too big.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_max_changes: Option<usize>,

    /// Number of characters in a single line after which a file is too big.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_max_line_length: Option<usize>,

    /// Header of the placeholder hunk for files that are too big.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_too_big_message: Option<String>,
}
