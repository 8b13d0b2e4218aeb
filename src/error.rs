//! Error types for udiff.
//!
//! Uses thiserror for derive macros. Only one variant comes out of the parser
//! itself; the rest belong to decoding, file reading, option handling and
//! the command line.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for udiff operations.
#[derive(Error, Debug)]
pub enum UdiffError {
    /// A `diff` line should have opened a file record but none is open.
    #[error("parser lost its file context at line {line}")]
    MissingFileContext {
        /// 1-based line number in the normalized input.
        line: usize,
    },

    /// The declared character encoding is not supported.
    #[error("unsupported encoding '{0}'")]
    UnknownEncoding(String),

    /// The input bytes are not valid in the declared encoding.
    #[error("failed to decode input as {encoding}: {reason}")]
    Decode { encoding: String, reason: String },

    /// Reading the diff input failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse options are invalid or could not be loaded.
    #[error("{0}")]
    Config(String),

    /// A command was given input it cannot act on.
    #[error("{0}")]
    UserError(String),
}

impl UdiffError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            UdiffError::MissingFileContext { .. } => exit_codes::PARSE_FAILURE,
            UdiffError::UnknownEncoding(_) => exit_codes::USER_ERROR,
            UdiffError::Decode { .. } => exit_codes::USER_ERROR,
            UdiffError::Io { .. } => exit_codes::USER_ERROR,
            UdiffError::Config(_) => exit_codes::USER_ERROR,
            UdiffError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for udiff operations.
pub type Result<T> = std::result::Result<T, UdiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_context_is_a_parse_failure() {
        let err = UdiffError::MissingFileContext { line: 3 };
        assert_eq!(err.exit_code(), exit_codes::PARSE_FAILURE);
        assert_eq!(err.to_string(), "parser lost its file context at line 3");
    }

    #[test]
    fn input_errors_are_user_errors() {
        let err = UdiffError::UnknownEncoding("klingon".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

        let err = UdiffError::Decode {
            encoding: "utf-8".to_string(),
            reason: "invalid byte".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

        let err = UdiffError::Config("bad option".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

        let err = UdiffError::UserError("no file matches 'x'".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn io_error_mentions_the_path() {
        let err = UdiffError::Io {
            path: PathBuf::from("changes.diff"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(err.to_string(), "failed to read 'changes.diff': no such file");
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = UdiffError::UnknownEncoding("ebcdic".to_string());
        assert_eq!(err.to_string(), "unsupported encoding 'ebcdic'");
    }
}
