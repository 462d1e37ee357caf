//! GitHub API client with retry support
//!
//! This crate provides a trait-based GitHub API client with optional retry
//! behavior. The design follows the decorator pattern, allowing retry
//! behavior to be composed with the base client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_request()                          │
//! │  - fetch_pull_request_diff()                     │
//! │  - post_issue_comment()                          │
//! │  - post_review_comment()                         │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ RetryingClient      │
//! │ (direct API)    │◄────────│ (decorator)         │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient, RetryingClient, RetryPolicy};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let octocrab = octocrab::Octocrab::builder()
//!     .personal_token("token".to_string())
//!     .build()?;
//!
//! // Direct client (no retries)
//! let direct = OctocrabClient::new(Arc::new(octocrab.clone()));
//!
//! // Client with bounded retry and growing delay
//! let retrying = RetryingClient::new(
//!     OctocrabClient::new(Arc::new(octocrab)),
//!     RetryPolicy::default(),
//! );
//!
//! // Both implement the same trait
//! let pr = retrying.fetch_pull_request("owner", "repo", 42).await?;
//! # let _ = direct;
//! # let _ = pr;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod octocrab_client;
pub mod retrying_client;
pub mod types;

/// Default GitHub API base (public GitHub).
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

pub use client::{GitHubClient, RetryPolicy};
pub use octocrab_client::OctocrabClient;
pub use retrying_client::RetryingClient;
pub use types::{IssueCommentPayload, PullRequestInfo, ReviewCommentPayload};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
