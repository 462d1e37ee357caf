//! Command line interface definition.

use clap::Parser;
use std::path::PathBuf;

/// gh-pr-commenter - post review comments from a comment file to a pull request
#[derive(Debug, Parser)]
#[command(name = "gh-pr-commenter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the XML file with the comments that should be posted
    #[arg(short, long)]
    pub file: PathBuf,

    /// Owner (user or organization) of the GitHub repository
    #[arg(short, long)]
    pub owner: String,

    /// Name of the GitHub repository
    #[arg(short, long)]
    pub repository: String,

    /// Number of the pull request to comment on
    #[arg(short = 'i', long = "id")]
    pub pull_request_id: u64,

    /// SHA of the head commit of this branch. Posting is skipped when the
    /// pull request has moved past it.
    #[arg(short, long)]
    pub sha: String,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Base URL of the GitHub API (GitHub Enterprise or a test server)
    #[arg(long, default_value = gh_client::DEFAULT_API_BASE)]
    pub github_url: String,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_arguments() {
        let cli = Cli::try_parse_from([
            "gh-pr-commenter",
            "--file",
            "comments.xml",
            "--owner",
            "octocat",
            "--repository",
            "hello-world",
            "--id",
            "42",
            "--sha",
            "abc123",
            "--token",
            "secret",
        ])
        .unwrap();

        assert_eq!(cli.file, PathBuf::from("comments.xml"));
        assert_eq!(cli.owner, "octocat");
        assert_eq!(cli.repository, "hello-world");
        assert_eq!(cli.pull_request_id, 42);
        assert_eq!(cli.sha, "abc123");
        assert_eq!(cli.token, "secret");
        assert_eq!(cli.github_url, gh_client::DEFAULT_API_BASE);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_missing_required_argument_fails() {
        let result = Cli::try_parse_from(["gh-pr-commenter", "--file", "comments.xml"]);
        assert!(result.is_err());
    }
}
