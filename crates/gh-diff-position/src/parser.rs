//! Parse unified diff format (as returned by the GitHub API).

use crate::model::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, PullRequestDiff};
use thiserror::Error;
use unidiff::{Hunk as UnidiffHunk, Line as UnidiffLine, PatchSet, PatchedFile};

/// Errors that can occur during diff parsing.
#[derive(Debug, Error)]
pub enum DiffParseError {
    /// The diff text could not be parsed.
    #[error("Failed to parse diff: {0}")]
    ParseFailed(String),
}

/// Parse a unified diff string into a structured [`PullRequestDiff`].
pub fn parse_pull_request_diff(diff_text: &str) -> Result<PullRequestDiff, DiffParseError> {
    let mut patch_set = PatchSet::new();
    patch_set
        .parse(diff_text)
        .map_err(|e| DiffParseError::ParseFailed(e.to_string()))?;

    let mut diff = PullRequestDiff::default();
    for patched_file in patch_set.files() {
        diff.files.push(parse_patched_file(patched_file));
    }
    diff.recalculate_totals();

    log::debug!(
        "Parsed pull request diff: {} files, +{} -{}",
        diff.files.len(),
        diff.total_additions,
        diff.total_deletions
    );
    Ok(diff)
}

fn parse_patched_file(file: &PatchedFile) -> FileDiff {
    let target = clean_path(&file.target_file);
    let source = clean_path(&file.source_file);

    let mut file_diff = FileDiff::new(&target);
    file_diff.status = determine_status(&source, &target);

    if source != target && !source.is_empty() && source != "/dev/null" {
        file_diff.old_path = Some(source);
    }

    for hunk in file.hunks() {
        file_diff.hunks.push(parse_hunk(hunk));
    }

    file_diff.recalculate_stats();
    file_diff
}

fn parse_hunk(hunk: &UnidiffHunk) -> Hunk {
    let mut parsed = Hunk::new(
        hunk.source_start as u64,
        hunk.source_length as u64,
        hunk.target_start as u64,
        hunk.target_length as u64,
    );

    // Keep the function context from the section header if present.
    let header = &hunk.section_header;
    if !header.is_empty() {
        parsed.header = format!(
            "@@ -{},{} +{},{} @@ {}",
            parsed.old_start, parsed.old_count, parsed.new_start, parsed.new_count, header
        );
    }

    for line in hunk.lines() {
        parsed.lines.push(parse_line(line));
    }

    parsed
}

fn parse_line(line: &UnidiffLine) -> DiffLine {
    let kind = match line.line_type.as_str() {
        "+" => LineKind::Addition,
        "-" => LineKind::Deletion,
        // Covers context lines and "\ No newline at end of file" markers.
        _ => LineKind::Context,
    };

    DiffLine {
        kind,
        content: line.value.to_string(),
        old_line: line.source_line_no.map(|n| n as u64),
        new_line: line.target_line_no.map(|n| n as u64),
    }
}

fn determine_status(source: &str, target: &str) -> FileStatus {
    if source == "/dev/null" || source.is_empty() {
        FileStatus::Added
    } else if target == "/dev/null" || target.is_empty() {
        FileStatus::Deleted
    } else if source != target {
        FileStatus::Renamed
    } else {
        FileStatus::Modified
    }
}

/// Clean the path by removing a/b prefixes from git diff output.
fn clean_path(path: &str) -> String {
    let path = path.trim();

    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }

    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DIFF: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 1111111..2222222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,4 +1,5 @@
 fn a() {}
+fn b() {}
 fn c() {}
 fn d() {}
 fn e() {}
@@ -20,3 +21,4 @@
 fn x() {}
+fn y() {}
 fn z() {}
 fn w() {}
diff --git a/README.md b/README.md
index 3333333..4444444 100644
--- a/README.md
+++ b/README.md
@@ -1,2 +1,2 @@
-old
+new
 same
";

    #[test]
    fn test_parse_sample_diff() {
        let diff = parse_pull_request_diff(SAMPLE_DIFF).unwrap();

        assert_eq!(diff.files.len(), 2);
        assert_eq!(diff.total_additions, 3);
        assert_eq!(diff.total_deletions, 1);

        let file = &diff.files[0];
        assert_eq!(file.path, "src/lib.rs");
        assert_eq!(file.status, FileStatus::Modified);
        assert_eq!(file.hunks.len(), 2);
        assert_eq!(file.additions, 2);
        assert_eq!(file.deletions, 0);

        let hunk = &file.hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.old_count, 4);
        assert_eq!(hunk.new_start, 1);
        assert_eq!(hunk.new_count, 5);
    }

    #[test]
    fn test_line_numbers_and_kinds() {
        let diff = parse_pull_request_diff(SAMPLE_DIFF).unwrap();
        let hunk = &diff.files[0].hunks[0];

        assert_eq!(hunk.lines[0].kind, LineKind::Context);
        assert_eq!(hunk.lines[0].old_line, Some(1));
        assert_eq!(hunk.lines[0].new_line, Some(1));

        assert_eq!(hunk.lines[1].kind, LineKind::Addition);
        assert_eq!(hunk.lines[1].old_line, None);
        assert_eq!(hunk.lines[1].new_line, Some(2));
    }

    #[test]
    fn test_review_positions_from_parsed_diff() {
        let diff = parse_pull_request_diff(SAMPLE_DIFF).unwrap();
        let file = diff.file("src/lib.rs").unwrap();

        // First hunk: positions 1..=5, second hunk header takes 6.
        assert_eq!(file.review_position(2), Some(2));
        assert_eq!(file.review_position(22), Some(8));
        assert_eq!(file.review_position(404), None);

        // The deleted line in README.md does not anchor; its replacement does.
        let readme = diff.file("README.md").unwrap();
        assert_eq!(readme.review_position(1), Some(2));
    }

    #[test]
    fn test_parse_new_file() {
        let diff_text = "\
diff --git a/new_file.rs b/new_file.rs
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/new_file.rs
@@ -0,0 +1,3 @@
+fn new_function() {
+    do_thing();
+}
";
        let diff = parse_pull_request_diff(diff_text).unwrap();
        assert_eq!(diff.files.len(), 1);
        assert_eq!(diff.files[0].status, FileStatus::Added);
        assert_eq!(diff.files[0].additions, 3);
    }

    #[test]
    fn test_parse_deleted_file() {
        let diff_text = "\
diff --git a/old_file.rs b/old_file.rs
deleted file mode 100644
index abc1234..0000000
--- a/old_file.rs
+++ /dev/null
@@ -1,3 +0,0 @@
-fn old_function() {
-    do_thing();
-}
";
        let diff = parse_pull_request_diff(diff_text).unwrap();
        assert_eq!(diff.files.len(), 1);
        assert_eq!(diff.files[0].status, FileStatus::Deleted);
        assert_eq!(diff.files[0].deletions, 3);
    }

    #[test]
    fn test_parse_renamed_file() {
        let diff_text = "\
diff --git a/old_name.rs b/new_name.rs
similarity index 95%
rename from old_name.rs
rename to new_name.rs
index abc123..def456 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1,3 +1,3 @@
 fn example() {
-    old();
+    new();
 }
";
        let diff = parse_pull_request_diff(diff_text).unwrap();
        let file = &diff.files[0];
        assert_eq!(file.path, "new_name.rs");
        assert_eq!(file.old_path, Some("old_name.rs".to_string()));
        assert_eq!(file.status, FileStatus::Renamed);
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("a/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("b/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("/dev/null"), "/dev/null");
    }

    #[test]
    fn test_empty_diff_has_no_files() {
        let diff = parse_pull_request_diff("").unwrap();
        assert!(diff.files.is_empty());
    }
}
