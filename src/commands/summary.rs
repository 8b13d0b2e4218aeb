//! Implementation of the `udiff summary` command.

use super::input::load_diff;
use crate::cli::ParseArgs;
use udiff::error::Result;
use udiff::{FileDiff, ParsedDiff};

/// Execute the `udiff summary` command.
pub fn cmd_summary(args: ParseArgs) -> Result<()> {
    let diff = load_diff(&args)?;
    print!("{}", render_summary(&diff));
    Ok(())
}

/// Counts header followed by one line per file.
fn render_summary(diff: &ParsedDiff) -> String {
    let mut out = format!(
        "{} file(s): added {}, removed {}, modified {}\n",
        diff.len(),
        diff.added(),
        diff.removed(),
        diff.modified()
    );

    for file in diff {
        out.push_str(&file_line(file));
        out.push('\n');
    }
    out
}

fn file_line(file: &FileDiff) -> String {
    let mut line = format!(
        "{:<8} {} +{} -{}",
        file.status().as_str(),
        file.display_name(),
        file.added_lines,
        file.deleted_lines
    );

    let mut notes = Vec::new();
    if file.is_rename {
        notes.push(format!("renamed from {}", file.old_name.as_deref().unwrap_or("")));
    }
    if file.is_copy {
        notes.push(format!("copied from {}", file.old_name.as_deref().unwrap_or("")));
    }
    if file.is_binary {
        notes.push("binary".to_string());
    }
    if file.is_combined {
        notes.push("combined".to_string());
    }
    if file.is_too_big {
        notes.push("too big".to_string());
    }

    if !notes.is_empty() {
        line.push_str(&format!(" ({})", notes.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use udiff::{ParseOptions, parse_str};

    #[test]
    fn test_summary_lists_every_file() {
        let text = concat!(
            "diff --git a/new.txt b/new.txt\n",
            "new file mode 100644\n",
            "--- /dev/null\n",
            "+++ b/new.txt\n",
            "@@ -0,0 +1,2 @@\n",
            "+one\n",
            "+two\n",
            "diff --git a/old.txt b/old.txt\n",
            "deleted file mode 100644\n",
            "--- a/old.txt\n",
            "+++ /dev/null\n",
            "@@ -1 +0,0 @@\n",
            "-gone\n",
        );
        let diff = parse_str(text, &ParseOptions::default()).unwrap();
        let summary = render_summary(&diff);

        assert_eq!(
            summary,
            concat!(
                "2 file(s): added 1, removed 1, modified 0\n",
                "added    new.txt +2 -0\n",
                "deleted  old.txt +0 -1\n",
            )
        );
    }

    #[test]
    fn test_summary_notes_renames() {
        let text = concat!(
            "diff --git a/before.rs b/after.rs\n",
            "similarity index 100%\n",
            "rename from before.rs\n",
            "rename to after.rs\n",
        );
        let diff = parse_str(text, &ParseOptions::default()).unwrap();
        let summary = render_summary(&diff);

        assert!(summary.contains("modified after.rs +0 -0 (renamed from before.rs)"));
    }

    #[test]
    fn test_summary_of_empty_input() {
        let diff = parse_str("", &ParseOptions::default()).unwrap();
        assert_eq!(
            render_summary(&diff),
            "0 file(s): added 0, removed 0, modified 0\n"
        );
    }
}
