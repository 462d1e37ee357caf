//! gh-pr-commenter - post review comments to a GitHub pull request
//!
//! Reads an XML comment file, checks that the pull request still points at
//! the expected head commit, and posts every comment in document order.
//! Comments anchored to a code line become review comments when the line is
//! part of the pull request's diff and fall back to conversation comments
//! otherwise.
//!
//! ## Quick Start
//!
//! ```bash
//! export GITHUB_TOKEN=...
//! gh-pr-commenter \
//!     --file comments.xml \
//!     --owner octocat \
//!     --repository hello-world \
//!     --id 42 \
//!     --sha "$(git rev-parse HEAD)"
//! ```

mod cli;
mod config;
mod output;
mod run;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use gh_client::{octocrab::Octocrab, OctocrabClient, RetryingClient};
use gh_comment_file::CommentList;
use run::PullRequestTarget;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Load .env before clap resolves the GITHUB_TOKEN fallback.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

/// Run the tool. Returns `Ok(false)` when some comments failed to post.
async fn execute(cli: Cli) -> anyhow::Result<bool> {
    let config = AppConfig::load();

    let content = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Cannot read the comment file {}", cli.file.display()))?;
    let comments = CommentList::parse_str(&content)
        .with_context(|| format!("Invalid comment file {}", cli.file.display()))?;

    log::info!(
        "Posting {} comments to {}/{}#{}",
        comments.len(),
        cli.owner,
        cli.repository,
        cli.pull_request_id
    );

    let octocrab = Octocrab::builder()
        .personal_token(cli.token.clone())
        .base_uri(&cli.github_url)?
        .build()?;
    let client = RetryingClient::new(
        OctocrabClient::new(Arc::new(octocrab)),
        config.retry_policy(),
    );

    let target = PullRequestTarget {
        owner: cli.owner,
        repository: cli.repository,
        pull_request_id: cli.pull_request_id,
        head_sha: cli.sha,
    };

    let outputs = run::run(&client, &target, &comments).await;
    Ok(output::print_outputs(&outputs))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
