//! Orchestration: decide for every comment how and whether to post it.

use crate::output::Output;
use gh_client::{GitHubClient, IssueCommentPayload, ReviewCommentPayload};
use gh_comment_file::{CodeLineComment, Comment, CommentList};
use gh_diff_position::{parse_pull_request_diff, PullRequestDiff};

/// The pull request the comments are destined for.
#[derive(Debug, Clone)]
pub struct PullRequestTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repository: String,
    /// Pull request number.
    pub pull_request_id: u64,
    /// Head commit SHA this run was produced against.
    pub head_sha: String,
}

impl PullRequestTarget {
    fn label(&self) -> String {
        format!("{}/{}#{}", self.owner, self.repository, self.pull_request_id)
    }
}

/// Post all comments of the document, in document order.
///
/// The returned outputs correspond to the work performed, in order. A failed
/// post yields an error output for that comment; the remaining comments are
/// still attempted. When the pull request's head no longer matches
/// `target.head_sha`, nothing is posted and a single skip notice is
/// returned.
pub async fn run(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
    comments: &CommentList,
) -> Vec<Output> {
    if comments.is_empty() {
        return vec![Output::Successful(format!(
            "The comment file contains no comments, nothing to post to {}",
            target.label()
        ))];
    }

    let pr = match client
        .fetch_pull_request(&target.owner, &target.repository, target.pull_request_id)
        .await
    {
        Ok(pr) => pr,
        Err(err) => {
            return vec![Output::Error(format!(
                "Could not load pull request {} from the GitHub web API: {:#}",
                target.label(),
                err
            ))]
        }
    };

    if pr.head_sha != target.head_sha {
        return vec![Output::Successful(format!(
            "Skipping posting comments because the SHA of the head of this branch differs \
             from the SHA of the pull request. Usually this means that the pull request has \
             been updated before this job (posting comments) has been started. Current SHA \
             of this branch is {} but remote pull request SHA is {}",
            target.head_sha, pr.head_sha
        ))];
    }

    // Fetched once and shared by all code line comments. An empty diff is
    // fine when there are none.
    let diff: Result<PullRequestDiff, String> = if comments.has_code_line_comments() {
        fetch_diff(client, target).await
    } else {
        Ok(PullRequestDiff::default())
    };

    let mut outputs = Vec::with_capacity(comments.len());
    for comment in &comments.comments {
        let output = match comment {
            Comment::Simple(simple) => post_issue_comment(client, target, &simple.text).await,
            Comment::CodeLine(code_line) => match &diff {
                Ok(diff) => post_code_line_comment(client, target, diff, code_line).await,
                Err(msg) => Output::Error(msg.clone()),
            },
        };
        outputs.push(output);
    }
    outputs
}

async fn fetch_diff(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
) -> Result<PullRequestDiff, String> {
    let text = client
        .fetch_pull_request_diff(&target.owner, &target.repository, target.pull_request_id)
        .await
        .map_err(|err| {
            format!(
                "Could not load the diff of pull request {} from the GitHub web API: {:#}",
                target.label(),
                err
            )
        })?;

    parse_pull_request_diff(&text)
        .map_err(|err| format!("Could not parse the diff of {}: {}", target.label(), err))
}

async fn post_issue_comment(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
    body: &str,
) -> Output {
    let payload = IssueCommentPayload::new(body);
    match client
        .post_issue_comment(
            &target.owner,
            &target.repository,
            target.pull_request_id,
            &payload,
        )
        .await
    {
        Ok(()) => Output::Successful(format!(
            "Successfully posted comment to {}",
            target.label()
        )),
        Err(err) => Output::Error(format!(
            "An error has occurred while trying to post a comment to {}: {:#}",
            target.label(),
            err
        )),
    }
}

async fn post_code_line_comment(
    client: &dyn GitHubClient,
    target: &PullRequestTarget,
    diff: &PullRequestDiff,
    comment: &CodeLineComment,
) -> Output {
    let position = diff
        .file(&comment.file_path)
        .and_then(|file| file.review_position(comment.line_number));

    let Some(position) = position else {
        // The file or line was not touched by this pull request, so the
        // comment cannot be anchored. De-anchor it into the conversation.
        log::info!(
            "{}:{} is not part of the diff of {}, posting as a conversation comment",
            comment.file_path,
            comment.line_number,
            target.label()
        );
        return post_issue_comment(client, target, &fallback_body(comment)).await;
    };

    let payload = ReviewCommentPayload {
        body: comment.text.clone(),
        commit_id: target.head_sha.clone(),
        path: comment.file_path.clone(),
        position,
    };
    match client
        .post_review_comment(
            &target.owner,
            &target.repository,
            target.pull_request_id,
            &payload,
        )
        .await
    {
        Ok(()) => Output::Successful(format!(
            "Successfully posted review comment to {} at {}:{}",
            target.label(),
            comment.file_path,
            comment.line_number
        )),
        Err(err) => Output::Error(format!(
            "An error has occurred while trying to post a review comment to {} at {}:{}: {:#}",
            target.label(),
            comment.file_path,
            comment.line_number,
            err
        )),
    }
}

/// Conversation-comment body for a code line comment that could not be
/// anchored, keeping the intended file and line visible.
fn fallback_body(comment: &CodeLineComment) -> String {
    format!(
        "`{}` line {} (not part of this pull request's diff): {}",
        comment.file_path, comment.line_number, comment.text
    )
}
