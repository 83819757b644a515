//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating the run configuration.
///
/// All of these are raised before the pipeline touches the filesystem, the
/// network or any subprocess.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The CodeCommit repository locator could not be parsed.
    #[error("Invalid CodeCommit repository '{url}': {message}")]
    InvalidSourceRepository { url: String, message: String },

    /// The GitHub repository locator could not be parsed.
    #[error(
        "Invalid GitHub repository '{url}'. Please provide it in this format: https://github.com/ORG/REPO"
    )]
    InvalidTargetRepository { url: String },

    /// The issue tracker base URL is not a valid absolute URL.
    #[error("Invalid issue tracker URL '{url}': {source}")]
    InvalidTrackerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Two options were set that cannot be used together.
    #[error("Conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// A required setting was given neither on the command line nor in the config file.
    #[error("Missing required setting: {name}")]
    MissingValue { name: String },

    /// Unknown GitHub backend name.
    #[error("Unknown GitHub backend '{value}', expected 'api' or 'gh-cli'")]
    UnknownBackend { value: String },
}
