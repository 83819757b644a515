//! Source provider error types.

use crate::command::CommandError;
use thiserror::Error;

/// Errors that can occur while reading from CodeCommit.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The AWS CLI call failed.
    #[error("AWS CLI call failed: {0}")]
    Command(#[from] CommandError),

    /// The AWS CLI output could not be parsed.
    #[error("Failed to parse {what} response: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
