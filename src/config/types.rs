//! Option types and defaults.

use serde::{Deserialize, Serialize};

/// Header of the placeholder hunk that replaces an oversized file's content.
pub const DEFAULT_TOO_BIG_MESSAGE: &str = "Diff too big to be displayed";

/// What the decoder does with byte sequences invalid in the declared encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrors {
    /// Fail the parse (default).
    #[default]
    Strict,
    /// Substitute U+FFFD and continue.
    Replace,
}
