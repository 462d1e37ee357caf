//! Diff data structures for a pull request's changes.

/// A complete diff for a pull request.
#[derive(Debug, Clone, Default)]
pub struct PullRequestDiff {
    /// All files changed in this pull request.
    pub files: Vec<FileDiff>,
    /// Total additions across all files.
    pub total_additions: usize,
    /// Total deletions across all files.
    pub total_deletions: usize,
}

impl PullRequestDiff {
    /// Look up a changed file by its post-change path.
    pub fn file(&self, path: &str) -> Option<&FileDiff> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Recalculate totals from files.
    pub fn recalculate_totals(&mut self) {
        self.total_additions = self.files.iter().map(|f| f.additions).sum();
        self.total_deletions = self.files.iter().map(|f| f.deletions).sum();
    }
}

/// A single file's diff.
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// Current file path (after rename if applicable).
    pub path: String,
    /// Previous file path (if renamed).
    pub old_path: Option<String>,
    /// File status.
    pub status: FileStatus,
    /// Change hunks.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FileDiff {
    /// Create a new file diff.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            status: FileStatus::Modified,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    /// Recalculate addition/deletion counts from the hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Addition)
            .count();
        self.deletions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Deletion)
            .count();
    }

    /// The review position of the given line in the post-change file.
    ///
    /// Position 1 is the line directly below this file's first `@@` header;
    /// every subsequent diff line increments the count, the `@@` headers of
    /// later hunks included. Returns `None` when the line is not part of the
    /// diff, which means a comment cannot be anchored there.
    pub fn review_position(&self, line_number: u64) -> Option<u64> {
        let mut position = 0u64;
        for (idx, hunk) in self.hunks.iter().enumerate() {
            if idx > 0 {
                // Hunk headers after the first occupy a position of their own.
                position += 1;
            }
            for line in &hunk.lines {
                position += 1;
                if line.new_line == Some(line_number) {
                    return Some(position);
                }
            }
        }
        None
    }
}

/// Status of a file in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File was added.
    Added,
    /// File was deleted.
    Deleted,
    /// File was modified in place.
    Modified,
    /// File was renamed (possibly with content changes).
    Renamed,
}

/// A contiguous change region within a file.
#[derive(Debug, Clone)]
pub struct Hunk {
    /// Start line in the old file.
    pub old_start: u64,
    /// Line count in the old file.
    pub old_count: u64,
    /// Start line in the new file.
    pub new_start: u64,
    /// Line count in the new file.
    pub new_count: u64,
    /// The `@@` header line, including any function context.
    pub header: String,
    /// The diff lines of this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a new hunk with the given ranges.
    pub fn new(old_start: u64, old_count: u64, new_start: u64, new_count: u64) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            header: format!("@@ -{},{} +{},{} @@", old_start, old_count, new_start, new_count),
            lines: Vec::new(),
        }
    }
}

/// Kind of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line present in both versions.
    Context,
    /// Line added in the new version.
    Addition,
    /// Line removed from the old version.
    Deletion,
}

/// A single line within a hunk.
#[derive(Debug, Clone)]
pub struct DiffLine {
    /// Kind of the line.
    pub kind: LineKind,
    /// Line content without the leading diff marker.
    pub content: String,
    /// Line number in the old file (absent for additions).
    pub old_line: Option<u64>,
    /// Line number in the new file (absent for deletions).
    pub new_line: Option<u64>,
}
