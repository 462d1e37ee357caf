//! GitHub client trait and retry policy definitions
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy, as well as the `RetryPolicy` used by the
//! retrying decorator.

use crate::types::{IssueCommentPayload, PullRequestInfo, ReviewCommentPayload};
use async_trait::async_trait;
use std::time::Duration;

/// Retry behavior for GitHub API clients
///
/// The delay grows linearly with the attempt number: the first retry waits
/// `start_delay`, the second `2 * start_delay`, and so on. Set at client
/// construction time, not per-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// How many retries are attempted after the initial call.
    pub retries: u32,
    /// Delay before the first retry.
    pub start_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            start_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry count and starting delay.
    pub fn new(retries: u32, start_delay: Duration) -> Self {
        Self {
            retries,
            start_delay,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            retries: 0,
            start_delay: Duration::ZERO,
        }
    }

    /// Delay before the given retry attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.start_delay * attempt
    }
}

/// GitHub API client trait
///
/// Defines the interface the commenter needs from the GitHub API.
/// Implementations can be direct (hitting the API) or decorated with retry
/// logic.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across async
/// tasks.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch the metadata of a pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    ///
    /// # Returns
    ///
    /// The pull request details (head SHA included), or an error if not
    /// found.
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestInfo>;

    /// Fetch the raw unified diff of a pull request
    ///
    /// Uses the `application/vnd.github.diff` media type of the pulls
    /// endpoint.
    ///
    /// # Returns
    ///
    /// The diff text, ready for `gh_diff_position::parse_pull_request_diff`.
    async fn fetch_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String>;

    /// Post a comment in the pull request conversation
    ///
    /// Issues and pull requests share the comments endpoint
    /// (`POST /repos/{owner}/{repo}/issues/{pr_number}/comments`).
    async fn post_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        payload: &IssueCommentPayload,
    ) -> anyhow::Result<()>;

    /// Post a review comment anchored to a diff position
    ///
    /// `POST /repos/{owner}/{repo}/pulls/{pr_number}/comments` with a body
    /// carrying the commit id, file path and diff position.
    async fn post_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        payload: &ReviewCommentPayload,
    ) -> anyhow::Result<()>;
}
