#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod command;
pub mod config;
pub mod credentials;
pub mod extractor;
pub mod mirror;
pub(crate) mod progress;
pub mod rate_limit;
pub mod replicator;
pub mod runner;
pub mod sink;
pub mod source;
pub mod summary;
pub mod translator;
pub mod workspace;

pub use command::{CommandError, SystemToolRunner, ToolRunner};
pub use config::{
    load_config_file, ConfigError, ConfigFile, GitHubBackend, SourceRepository, TargetRepository,
};
pub use credentials::{
    configured_github_token, resolve_github_token, validate_aws_credentials, validate_gh_cli,
    validate_github_token, CredentialsError,
};
pub use extractor::{extract_change_requests, Extraction};
pub use mirror::{
    mirror_repository, Checkpoint, MirrorError, MirrorOptions, NoCheckpoint, StdinCheckpoint,
};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use replicator::{replicate, FixedDelay, NoDelay, PacingPolicy};
pub use runner::{Runner, RunnerConfig, RunnerError, Stage};
pub use sink::{ChangeRequestSink, CreatedChangeRequest, GhCliSink, GitHubApiSink, SinkError};
pub use source::{
    AwsCliSource, ChangeRequestSource, PullRequestTarget, RawChangeRequest, RepositoryMetadata,
    SourceError,
};
pub use summary::{MigrationReport, MigrationResult, MirrorOutcome};
pub use translator::{translate, translate_all, TranslatedChangeRequest};
pub use workspace::{Workspace, WorkspaceError};
