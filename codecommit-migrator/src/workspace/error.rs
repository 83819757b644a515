//! Workspace error types.

use thiserror::Error;

/// Errors that can occur while creating or removing the workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The temporary directory could not be created.
    #[error("Failed to create workspace in '{parent}': {source}")]
    Create {
        parent: String,
        #[source]
        source: std::io::Error,
    },

    /// The temporary directory could not be removed.
    #[error("Failed to remove workspace '{path}': {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
