//! Runner error types.

use crate::config::ConfigError;
use crate::credentials::CredentialsError;
use crate::mirror::MirrorError;
use crate::sink::SinkError;
use crate::source::SourceError;
use crate::workspace::WorkspaceError;

/// Errors that stop a migration run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credentials are missing or rejected.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// The workspace could not be created.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Clone, cleanup or push failed.
    #[error(transparent)]
    Mirror(#[from] MirrorError),

    /// Reading pull requests from CodeCommit failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Talking to GitHub failed outside of per pull request creation.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
