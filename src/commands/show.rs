//! Implementation of the `udiff show` command.
//!
//! Displays one file record of a diff, found by name.

use super::input::load_diff;
use crate::cli::ShowArgs;
use udiff::error::{Result, UdiffError};
use udiff::{FileDiff, ParentValue, ParsedDiff};

/// Execute the `udiff show` command.
///
/// Looks the file up by substring of its old or new name and prints its
/// metadata followed by every hunk and line.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let diff = load_diff(&args.parse)?;
    let file = find_file(&diff, &args.name)?;
    print!("{}", render_file(file));
    Ok(())
}

fn find_file<'a>(diff: &'a ParsedDiff, name: &str) -> Result<&'a FileDiff> {
    diff.get_by_name(name).ok_or_else(|| {
        let known: Vec<&str> = diff.iter().map(FileDiff::display_name).collect();
        UdiffError::UserError(format!(
            "no file matching '{}' in the diff.\n\nFiles: {}",
            name,
            if known.is_empty() {
                "(none)".to_string()
            } else {
                known.join(", ")
            }
        ))
    })
}

fn render_file(file: &FileDiff) -> String {
    let mut out = String::new();

    out.push_str("================================================================================\n");
    out.push_str(&format!("{} [{}]\n", file.display_name(), file.status().as_str()));
    out.push_str("================================================================================\n");

    field(&mut out, "Old name", file.old_name.as_deref());
    field(&mut out, "New name", file.new_name.as_deref());
    if !file.extension.is_empty() {
        field(&mut out, "Extension", Some(&file.extension));
    }
    if let Some(ts) = file.old_timestamp {
        field(&mut out, "Old time", Some(&ts.to_rfc3339()));
    }
    if let Some(ts) = file.new_timestamp {
        field(&mut out, "New time", Some(&ts.to_rfc3339()));
    }

    let modes = [
        ("Old mode", &file.old_mode),
        ("New mode", &file.new_mode),
        ("Deleted mode", &file.deleted_file_mode),
        ("New file mode", &file.new_file_mode),
        ("Before", &file.checksum_before),
    ];
    for (label, value) in modes {
        field(&mut out, label, value.as_ref().map(ParentValue::to_string));
    }
    field(&mut out, "After", file.checksum_after.as_deref());
    field(&mut out, "Mode", file.mode.as_deref());

    if file.unchanged_percentage > 0 {
        field(&mut out, "Similarity", Some(&format!("{}%", file.unchanged_percentage)));
    }
    if file.changed_percentage > 0 {
        field(&mut out, "Dissimilarity", Some(&format!("{}%", file.changed_percentage)));
    }

    let flags: Vec<&str> = [
        (file.is_git_diff, "git"),
        (file.is_copy, "copy"),
        (file.is_rename, "rename"),
        (file.is_binary, "binary"),
        (file.is_combined, "combined"),
        (file.is_too_big, "too big"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();
    if !flags.is_empty() {
        field(&mut out, "Flags", Some(&flags.join(", ")));
    }
    field(
        &mut out,
        "Changes",
        Some(&format!("+{} -{}", file.added_lines, file.deleted_lines)),
    );

    out.push_str("--------------------------------------------------------------------------------\n");
    if file.hunks().is_empty() {
        out.push_str("(No hunks)\n");
    }
    for hunk in file {
        out.push_str(&hunk.header);
        out.push('\n');
        for line in hunk {
            out.push_str(&line.to_string());
            out.push('\n');
        }
    }
    out
}

fn field<S: AsRef<str>>(out: &mut String, label: &str, value: Option<S>) {
    if let Some(value) = value {
        out.push_str(&format!("{:<14} {}\n", format!("{}:", label), value.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use udiff::{ParseOptions, parse_str};

    const SAMPLE: &str = concat!(
        "diff --git a/src/app.js b/src/app.js\n",
        "index 1a2b3c4..5d6e7f8 100644\n",
        "--- a/src/app.js\n",
        "+++ b/src/app.js\n",
        "@@ -1,2 +1,2 @@\n",
        " const a = 1;\n",
        "-const b = 2;\n",
        "+const b = 3;\n",
    );

    #[test]
    fn test_find_file_by_substring() {
        let diff = parse_str(SAMPLE, &ParseOptions::default()).unwrap();
        let file = find_file(&diff, "app.js").unwrap();
        assert_eq!(file.new_name.as_deref(), Some("src/app.js"));
    }

    #[test]
    fn test_find_file_lists_known_names() {
        let diff = parse_str(SAMPLE, &ParseOptions::default()).unwrap();
        let err = find_file(&diff, "missing.rs").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing.rs"));
        assert!(message.contains("src/app.js"));
    }

    #[test]
    fn test_render_file_shows_metadata_and_lines() {
        let diff = parse_str(SAMPLE, &ParseOptions::default()).unwrap();
        let rendered = render_file(&diff[0]);

        assert!(rendered.contains("src/app.js [modified]"));
        assert!(rendered.contains("Before:        1a2b3c4\n"));
        assert!(rendered.contains("After:         5d6e7f8\n"));
        assert!(rendered.contains("Mode:          100644\n"));
        assert!(rendered.contains("Flags:         git\n"));
        assert!(rendered.contains("Changes:       +1 -1\n"));
        assert!(rendered.contains("@@ -1,2 +1,2 @@\n const a = 1;\n-const b = 2;\n+const b = 3;\n"));
    }
}
