//! Structured dumps of parsed diffs.
//!
//! Every record type lists its fields explicitly; nothing is derived from
//! struct layout, so the JSON shape only changes when this file does.

use serde_json::{Value, json};

use crate::config::ParseOptions;

use super::api::ParsedDiff;
use super::model::{FileDiff, Hunk, Line, ParentValue};

fn parent_value(value: Option<&ParentValue>) -> Value {
    match value {
        None => Value::Null,
        Some(ParentValue::Single(v)) => json!(v),
        Some(ParentValue::Combined(first, second)) => json!([first, second]),
    }
}

fn options(options: &ParseOptions) -> Value {
    json!({
        "encoding": options.encoding,
        "decode_errors": options.decode_errors,
        "src_prefix": options.src_prefix,
        "dst_prefix": options.dst_prefix,
        "diff_max_changes": options.diff_max_changes,
        "diff_max_line_length": options.diff_max_line_length,
        "diff_too_big_message": options.diff_too_big_message,
    })
}

impl Line {
    pub fn dump(&self) -> Value {
        json!({
            "content": self.content(),
            "raw": self.raw(),
            "line_type": self.kind().as_str(),
            "source_line_no": self.source_line_no(),
            "target_line_no": self.target_line_no(),
        })
    }
}

impl Hunk {
    pub fn dump(&self) -> Value {
        json!({
            "header": self.header,
            "old_start": self.old_start,
            "old_start_secondary": self.old_start_secondary,
            "new_start": self.new_start,
            "added": self.added(),
            "removed": self.removed(),
            "context": self.context(),
            "lines": self.iter().map(Line::dump).collect::<Vec<_>>(),
        })
    }
}

impl FileDiff {
    pub fn dump(&self) -> Value {
        json!({
            "old_name": self.old_name,
            "new_name": self.new_name,
            "extension": self.extension,
            "old_timestamp": self.old_timestamp.map(|t| t.to_rfc3339()),
            "new_timestamp": self.new_timestamp.map(|t| t.to_rfc3339()),
            "status": self.status().as_str(),
            "is_new": self.is_new,
            "is_deleted": self.is_deleted,
            "is_copy": self.is_copy,
            "is_rename": self.is_rename,
            "is_binary": self.is_binary,
            "is_combined": self.is_combined,
            "is_git_diff": self.is_git_diff,
            "is_too_big": self.is_too_big,
            "old_mode": parent_value(self.old_mode.as_ref()),
            "new_mode": parent_value(self.new_mode.as_ref()),
            "deleted_file_mode": parent_value(self.deleted_file_mode.as_ref()),
            "new_file_mode": parent_value(self.new_file_mode.as_ref()),
            "mode": self.mode,
            "unchanged_percentage": self.unchanged_percentage,
            "changed_percentage": self.changed_percentage,
            "checksum_before": parent_value(self.checksum_before.as_ref()),
            "checksum_after": self.checksum_after,
            "added_lines": self.added_lines,
            "deleted_lines": self.deleted_lines,
            "hunks": self.iter().map(Hunk::dump).collect::<Vec<_>>(),
        })
    }
}

impl ParsedDiff {
    /// Nested JSON of the options and every file, hunk and line.
    pub fn dump(&self) -> Value {
        json!({
            "options": options(self.options()),
            "files": self.iter().map(FileDiff::dump).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_dump() {
        let dump = Line::removed("old", 3).dump();
        assert_eq!(dump["content"], "old");
        assert_eq!(dump["raw"], "-old");
        assert_eq!(dump["line_type"], "removed");
        assert_eq!(dump["source_line_no"], 3);
        assert!(dump["target_line_no"].is_null());
    }

    #[test]
    fn test_parent_value_shapes() {
        assert_eq!(parent_value(None), Value::Null);
        assert_eq!(
            parent_value(Some(&ParentValue::Single("100644".into()))),
            json!("100644")
        );
        assert_eq!(
            parent_value(Some(&ParentValue::Combined("a1".into(), "b2".into()))),
            json!(["a1", "b2"])
        );
    }

    #[test]
    fn test_options_dump_uses_snake_case_policy() {
        let dump = options(&ParseOptions::default());
        assert_eq!(dump["decode_errors"], "strict");
        assert!(dump["encoding"].is_null());
    }
}
