//! Tests for parse options.

use crate::config::{DEFAULT_TOO_BIG_MESSAGE, DecodeErrors, ParseOptions};
use crate::encoding::Encoding;
use crate::error::UdiffError;
use tempfile::TempDir;

#[test]
fn test_default_options() {
    let options = ParseOptions::default();

    assert!(options.encoding.is_none());
    assert_eq!(options.decode_errors, DecodeErrors::Strict);
    assert!(options.src_prefix.is_none());
    assert!(options.dst_prefix.is_none());
    assert!(options.max_changes().is_none());
    assert!(options.max_line_length().is_none());
    assert_eq!(options.too_big_message(), DEFAULT_TOO_BIG_MESSAGE);
    assert_eq!(options.resolved_encoding().unwrap(), Encoding::utf8());
}

#[test]
fn test_parse_minimal_yaml() {
    let options = ParseOptions::from_yaml("").unwrap();
    assert_eq!(options, ParseOptions::default());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
encoding: latin-1
decode_errors: replace
src_prefix: "old/"
dst_prefix: "new/"
diff_max_changes: 500
diff_max_line_length: 2000
diff_too_big_message: "Too large"
"#;
    let options = ParseOptions::from_yaml(yaml).unwrap();

    assert_eq!(options.resolved_encoding().unwrap(), Encoding::Latin1);
    assert_eq!(options.decode_errors, DecodeErrors::Replace);
    assert_eq!(options.src_prefix.as_deref(), Some("old/"));
    assert_eq!(options.dst_prefix.as_deref(), Some("new/"));
    assert_eq!(options.max_changes(), Some(500));
    assert_eq!(options.max_line_length(), Some(2000));
    assert_eq!(options.too_big_message(), "Too large");
}

#[test]
fn test_unknown_keys_are_ignored() {
    let yaml = r#"
diff_max_changes: 10
future_option: true
"#;
    let options = ParseOptions::from_yaml(yaml).unwrap();
    assert_eq!(options.max_changes(), Some(10));
}

#[test]
fn test_zero_limits_are_disabled() {
    let options = ParseOptions {
        diff_max_changes: Some(0),
        diff_max_line_length: Some(0),
        ..Default::default()
    };
    assert!(options.max_changes().is_none());
    assert!(options.max_line_length().is_none());
}

#[test]
fn test_empty_message_falls_back_to_default() {
    let options = ParseOptions {
        diff_too_big_message: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(options.too_big_message(), DEFAULT_TOO_BIG_MESSAGE);
}

#[test]
fn test_validate_rejects_blank_message() {
    let result = ParseOptions::from_yaml("diff_too_big_message: \"  \"\n");
    assert!(matches!(result, Err(UdiffError::Config(msg)) if msg.contains("diff_too_big_message")));
}

#[test]
fn test_validate_rejects_unknown_encoding() {
    let result = ParseOptions::from_yaml("encoding: klingon\n");
    assert!(matches!(result, Err(UdiffError::UnknownEncoding(_))));
}

#[test]
fn test_validate_rejects_empty_prefix() {
    let result = ParseOptions::from_yaml("src_prefix: \"\"\n");
    assert!(matches!(result, Err(UdiffError::Config(msg)) if msg.contains("src_prefix")));
}

#[test]
fn test_invalid_yaml_is_a_config_error() {
    let result = ParseOptions::from_yaml("diff_max_changes: [1, 2\n");
    assert!(matches!(result, Err(UdiffError::Config(_))));
}

#[test]
fn test_yaml_roundtrip_keeps_values() {
    let options = ParseOptions {
        dst_prefix: Some("dst/".to_string()),
        diff_max_changes: Some(42),
        ..Default::default()
    };
    let yaml = options.to_yaml().unwrap();
    assert!(!yaml.contains("src_prefix"));
    assert_eq!(ParseOptions::from_yaml(&yaml).unwrap(), options);
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("udiff.yaml");
    std::fs::write(&path, "diff_max_line_length: 120\n").unwrap();

    let options = ParseOptions::load(&path).unwrap();
    assert_eq!(options.max_line_length(), Some(120));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = ParseOptions::load(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(UdiffError::Config(msg)) if msg.contains("missing.yaml")));
}
