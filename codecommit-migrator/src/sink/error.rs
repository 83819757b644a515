//! Target provider error types.

use crate::command::CommandError;
use thiserror::Error;

/// Errors that can occur while talking to GitHub.
#[derive(Debug, Error)]
pub enum SinkError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The `gh` CLI call failed.
    #[error("gh CLI call failed: {0}")]
    Command(#[from] CommandError),

    /// The target repository does not exist or is not accessible.
    #[error("Couldn't access repository '{repository}'")]
    RepositoryNotFound { repository: String },

    /// A branch name is not a valid git reference name.
    #[error("Invalid {role} branch name '{branch}': {message}")]
    InvalidBranch {
        role: &'static str,
        branch: String,
        message: String,
    },

    /// The tool printed something that could not be understood.
    #[error("Unexpected output: {message}")]
    UnexpectedOutput { message: String },
}
