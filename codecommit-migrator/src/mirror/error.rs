//! Mirror error types.

use crate::command::CommandError;
use thiserror::Error;

/// Errors that abort the mirror stage.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The bare clone failed.
    #[error("Failed to clone '{url}': {source}")]
    CloneFailed {
        url: String,
        #[source]
        source: CommandError,
    },

    /// Big-blob cleanup (bfg, reflog expiry or gc) failed.
    #[error("Big file cleanup failed: {source}")]
    CleanupFailed {
        #[source]
        source: CommandError,
    },

    /// The operator checkpoint could not be completed.
    #[error("Push confirmation failed: {source}")]
    CheckpointFailed {
        #[source]
        source: std::io::Error,
    },

    /// The mirror push failed.
    #[error("Failed to push mirror to '{url}': {source}")]
    PushFailed {
        url: String,
        #[source]
        source: CommandError,
    },
}
