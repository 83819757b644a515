//! Credential error types.

use crate::command::CommandError;
use crate::sink::SinkError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors that can occur while checking credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The AWS CLI could not confirm an identity.
    #[error("Failed to validate AWS credentials: {0}")]
    Aws(#[source] SourceError),

    /// No GitHub token was configured and `gh` could not provide one.
    #[error(
        "No GitHub token found. Pass --github-token, set GITHUB_TOKEN or log in with `gh auth login`"
    )]
    MissingGitHubToken {
        #[source]
        source: Option<CommandError>,
    },

    /// GitHub rejected the token.
    #[error("Failed to validate GitHub token: {0}")]
    GitHub(#[source] octocrab::Error),

    /// `gh` is missing, not logged in, or its token was rejected.
    #[error("Failed to validate gh authentication: {0}")]
    GhCli(#[source] SinkError),
}
