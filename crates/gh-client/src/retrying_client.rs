//! Retrying decorator for GitHub API clients
//!
//! Wraps any `GitHubClient` and retries failed calls a bounded number of
//! times with a delay that grows with each attempt. Every operation is
//! retried, posts included: the posts are one-shot CI-style requests and a
//! duplicated comment is preferable to a dropped one.

use crate::client::{GitHubClient, RetryPolicy};
use crate::types::{IssueCommentPayload, PullRequestInfo, ReviewCommentPayload};
use async_trait::async_trait;
use log::warn;
use std::future::Future;

/// Decorator that adds bounded retry to an inner `GitHubClient`.
#[derive(Debug, Clone)]
pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: GitHubClient> RetryingClient<C> {
    /// Wrap `inner` with the given retry policy.
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The policy this client retries with.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn retry<T, F, Fut>(&self, what: &str, mut call: F) -> anyhow::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.policy.retries {
                        return Err(err);
                    }
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        what, attempt, self.policy.retries, delay, err
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl<C: GitHubClient> GitHubClient for RetryingClient<C> {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestInfo> {
        self.retry("fetch_pull_request", || {
            self.inner.fetch_pull_request(owner, repo, pr_number)
        })
        .await
    }

    async fn fetch_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        self.retry("fetch_pull_request_diff", || {
            self.inner.fetch_pull_request_diff(owner, repo, pr_number)
        })
        .await
    }

    async fn post_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        payload: &IssueCommentPayload,
    ) -> anyhow::Result<()> {
        self.retry("post_issue_comment", || {
            self.inner.post_issue_comment(owner, repo, pr_number, payload)
        })
        .await
    }

    async fn post_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        payload: &ReviewCommentPayload,
    ) -> anyhow::Result<()> {
        self.retry("post_review_comment", || {
            self.inner.post_review_comment(owner, repo, pr_number, payload)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock client that fails a configurable number of times before
    /// succeeding, recording every call.
    #[derive(Clone)]
    struct FlakyClient {
        failures_remaining: Arc<Mutex<u32>>,
        call_count: Arc<Mutex<u32>>,
    }

    impl FlakyClient {
        fn failing(times: u32) -> Self {
            Self {
                failures_remaining: Arc::new(Mutex::new(times)),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        fn call_count(&self) -> u32 {
            *self.call_count.lock().unwrap()
        }

        fn next_result(&self) -> anyhow::Result<()> {
            *self.call_count.lock().unwrap() += 1;
            let mut failures = self.failures_remaining.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                anyhow::bail!("simulated API failure");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl GitHubClient for FlakyClient {
        async fn fetch_pull_request(
            &self,
            _owner: &str,
            _repo: &str,
            pr_number: u64,
        ) -> anyhow::Result<PullRequestInfo> {
            self.next_result()?;
            Ok(PullRequestInfo {
                number: pr_number,
                title: "Test PR".to_string(),
                head_sha: "abc123".to_string(),
                html_url: "https://github.com/test/repo/pull/1".to_string(),
            })
        }

        async fn fetch_pull_request_diff(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
        ) -> anyhow::Result<String> {
            self.next_result()?;
            Ok(String::new())
        }

        async fn post_issue_comment(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
            _payload: &IssueCommentPayload,
        ) -> anyhow::Result<()> {
            self.next_result()
        }

        async fn post_review_comment(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
            _payload: &ReviewCommentPayload,
        ) -> anyhow::Result<()> {
            self.next_result()
        }
    }

    fn fast_policy(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_does_not_retry() {
        let mock = FlakyClient::failing(0);
        let client = RetryingClient::new(mock.clone(), fast_policy(3));

        let pr = client.fetch_pull_request("owner", "repo", 1).await.unwrap();
        assert_eq!(pr.number, 1);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let mock = FlakyClient::failing(2);
        let client = RetryingClient::new(mock.clone(), fast_policy(3));

        let payload = IssueCommentPayload::new("LGTM");
        client
            .post_issue_comment("owner", "repo", 1, &payload)
            .await
            .unwrap();
        assert_eq!(mock.call_count(), 3); // 2 failures + 1 success
    }

    #[tokio::test]
    async fn test_gives_up_after_policy_is_exhausted() {
        let mock = FlakyClient::failing(10);
        let client = RetryingClient::new(mock.clone(), fast_policy(2));

        let err = client
            .fetch_pull_request_diff("owner", "repo", 1)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("simulated API failure"));
        assert_eq!(mock.call_count(), 3); // initial call + 2 retries
    }

    #[tokio::test]
    async fn test_no_retries_with_none_policy() {
        let mock = FlakyClient::failing(1);
        let client = RetryingClient::new(mock.clone(), RetryPolicy::none());

        let payload = ReviewCommentPayload {
            body: "fix".to_string(),
            commit_id: "abc".to_string(),
            path: "a.rs".to_string(),
            position: 1,
        };
        let result = client.post_review_comment("owner", "repo", 1, &payload).await;
        assert!(result.is_err());
        assert_eq!(mock.call_count(), 1);
    }
}
