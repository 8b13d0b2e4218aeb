//! Parse options for udiff.
//!
//! This module defines [`ParseOptions`], the knobs recognised by the parser
//! (filename prefixes, size limits, the truncation message) plus the input
//! encoding handed to the decoder. Options can be built in code or loaded
//! from a YAML file; unknown keys are ignored for forward compatibility.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::ParseOptions;
pub use types::{DEFAULT_TOO_BIG_MESSAGE, DecodeErrors};
