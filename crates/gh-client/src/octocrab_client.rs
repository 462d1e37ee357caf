//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab
//! library. This client makes real API calls without any retrying.

use crate::client::GitHubClient;
use crate::types::{IssueCommentPayload, PullRequestInfo, ReviewCommentPayload};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
///
/// This is the base implementation that makes actual API calls. It can be
/// wrapped by `RetryingClient` to add retry behavior.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestInfo> {
        debug!("Fetching PR {}/{}#{}", owner, repo, pr_number);

        let pr = self.octocrab.pulls(owner, repo).get(pr_number).await?;
        Ok(convert_pull_request(&pr))
    }

    async fn fetch_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        debug!("Fetching diff for PR {}/{}#{}", owner, repo, pr_number);

        let diff = self.octocrab.pulls(owner, repo).get_diff(pr_number).await?;
        Ok(diff)
    }

    async fn post_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        payload: &IssueCommentPayload,
    ) -> anyhow::Result<()> {
        debug!("Posting issue comment on PR {}/{}#{}", owner, repo, pr_number);

        self.octocrab
            .issues(owner, repo)
            .create_comment(pr_number, &payload.body)
            .await?;
        Ok(())
    }

    async fn post_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        payload: &ReviewCommentPayload,
    ) -> anyhow::Result<()> {
        debug!(
            "Posting review comment on PR {}/{}#{} at {}:{}",
            owner, repo, pr_number, payload.path, payload.position
        );

        // Octocrab has no typed wrapper for position-anchored review
        // comments, so go through the generic POST.
        let route = format!("/repos/{}/{}/pulls/{}/comments", owner, repo, pr_number);
        let _response: serde_json::Value = self.octocrab.post(route, Some(payload)).await?;
        Ok(())
    }
}

/// Convert octocrab PullRequest to our PullRequestInfo type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequestInfo {
    PullRequestInfo {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        head_sha: pr.head.sha.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}
