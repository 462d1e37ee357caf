//! # gh-diff-position
//!
//! Parses the unified diff of a pull request (as returned by the GitHub API
//! with the `application/vnd.github.diff` media type) and answers the one
//! question the commenter needs: at which review "position" does a given
//! line of a changed file sit?
//!
//! GitHub anchors review comments by position, not by file line number: the
//! line directly below a file's first `@@` hunk header is position 1 and the
//! count keeps increasing through every following diff line, hunk headers of
//! later hunks included.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_diff_position::parse_pull_request_diff;
//!
//! let diff = parse_pull_request_diff(diff_text)?;
//! if let Some(file) = diff.file("src/main.rs") {
//!     if let Some(position) = file.review_position(10) {
//!         // post a review comment at `position`
//!     }
//! }
//! ```

pub mod model;
pub mod parser;

pub use model::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, PullRequestDiff};
pub use parser::{parse_pull_request_diff, DiffParseError};
