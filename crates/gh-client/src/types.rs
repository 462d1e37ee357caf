//! GitHub API data transfer objects
//!
//! These types represent the data exchanged with the GitHub API. They are
//! intentionally separate from the comment-file model to keep this crate
//! pure and reusable.

use serde::{Deserialize, Serialize};

/// Pull request metadata, reduced to what the commenter needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// HEAD commit SHA of the PR branch
    pub head_sha: String,

    /// PR URL for messages
    pub html_url: String,
}

/// Body of a comment for the pull request conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCommentPayload {
    /// The text message (can contain markdown)
    pub body: String,
}

impl IssueCommentPayload {
    /// Create a payload from the comment text.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Body of a review comment on a certain file at a certain diff position.
///
/// This is what a person leaves during a code review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCommentPayload {
    /// The text message (can contain markdown)
    pub body: String,

    /// The SHA of the commit to comment on. Not using the head SHA may
    /// render the comment outdated.
    pub commit_id: String,

    /// The path to the file to comment on, relative to the repository root
    pub path: String,

    /// The position (not line number) within the diff of `path`. See
    /// `gh_diff_position::FileDiff::review_position` for how it is counted.
    pub position: u64,
}
