//! Input handling shared by every command: option resolution, reading and parsing.

use crate::cli::ParseArgs;
use log::debug;
use std::io::Read;
use std::path::PathBuf;
use udiff::config::{DecodeErrors, ParseOptions};
use udiff::error::{Result, UdiffError};
use udiff::{ParsedDiff, parse_bytes};

/// Input name that selects stdin.
pub const STDIN: &str = "-";

/// Build parse options from `--config` and the individual flags.
///
/// Flags win over values loaded from the options file.
///
/// # Returns
///
/// * `Ok(ParseOptions)` - Validated options
/// * `Err(UdiffError::Config)` - The options file or a flag value is invalid
pub fn build_options(args: &ParseArgs) -> Result<ParseOptions> {
    let mut options = match &args.config {
        Some(path) => ParseOptions::load(path)?,
        None => ParseOptions::default(),
    };

    if let Some(encoding) = &args.encoding {
        options.encoding = Some(encoding.clone());
    }
    if let Some(prefix) = &args.src_prefix {
        options.src_prefix = Some(prefix.clone());
    }
    if let Some(prefix) = &args.dst_prefix {
        options.dst_prefix = Some(prefix.clone());
    }
    if let Some(limit) = args.max_changes {
        options.diff_max_changes = Some(limit);
    }
    if let Some(limit) = args.max_line_length {
        options.diff_max_line_length = Some(limit);
    }
    if let Some(message) = &args.too_big_message {
        options.diff_too_big_message = Some(message.clone());
    }
    if args.replace_invalid {
        options.decode_errors = DecodeErrors::Replace;
    }

    options.validate()?;
    Ok(options)
}

/// Read the raw diff bytes from a file, or from stdin when `input` is `-`.
pub fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == STDIN {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|source| UdiffError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(bytes);
    }

    std::fs::read(input).map_err(|source| UdiffError::Io {
        path: PathBuf::from(input),
        source,
    })
}

/// Resolve options, read the input and parse it.
pub fn load_diff(args: &ParseArgs) -> Result<ParsedDiff> {
    let options = build_options(args)?;
    let bytes = read_input(&args.input)?;
    debug!("read {} bytes from {}", bytes.len(), args.input);
    parse_bytes(&bytes, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args_for(input: &str) -> ParseArgs {
        ParseArgs {
            input: input.to_string(),
            ..ParseArgs::default()
        }
    }

    #[test]
    fn test_build_options_defaults() {
        let options = build_options(&args_for("-")).unwrap();
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "src_prefix: from-file/").unwrap();
        writeln!(config, "diff_max_changes: 10").unwrap();
        writeln!(config, "diff_max_line_length: 80").unwrap();

        let args = ParseArgs {
            config: Some(config.path().to_string_lossy().into_owned()),
            max_changes: Some(99),
            replace_invalid: true,
            ..args_for("-")
        };
        let options = build_options(&args).unwrap();

        assert_eq!(options.src_prefix.as_deref(), Some("from-file/"));
        assert_eq!(options.diff_max_changes, Some(99));
        assert_eq!(options.diff_max_line_length, Some(80));
        assert_eq!(options.decode_errors, DecodeErrors::Replace);
    }

    #[test]
    fn test_invalid_flag_value_is_rejected() {
        let args = ParseArgs {
            encoding: Some("klingon".to_string()),
            ..args_for("-")
        };
        let err = build_options(&args).unwrap_err();
        assert!(matches!(err, UdiffError::UnknownEncoding(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let args = ParseArgs {
            config: Some("/nonexistent/udiff.yaml".to_string()),
            ..args_for("-")
        };
        let err = build_options(&args).unwrap_err();
        assert!(matches!(err, UdiffError::Config(_)));
    }

    #[test]
    fn test_load_diff_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "--- a/hello.txt\n+++ b/hello.txt\n@@ -1 +1 @@\n-hello\n+world\n"
        )
        .unwrap();

        let diff = load_diff(&args_for(&file.path().to_string_lossy())).unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].new_name.as_deref(), Some("hello.txt"));
        assert_eq!(diff[0].added_lines, 1);
        assert_eq!(diff[0].deleted_lines, 1);
    }

    #[test]
    fn test_read_missing_input() {
        let err = read_input("/nonexistent/changes.diff").unwrap_err();
        assert!(matches!(err, UdiffError::Io { .. }));
    }
}
