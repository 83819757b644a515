//! GitHub side of the migration.
//!
//! [`ChangeRequestSink`] is the narrow capability the orchestrator and the
//! replicator need. Two interchangeable implementations exist:
//! [`GitHubApiSink`] (REST API via octocrab) and [`GhCliSink`] (`gh` tool).

mod error;
mod gh_cli;
mod github_api;

pub use error::SinkError;
pub use gh_cli::{parse_created_url, parse_login, GhCliSink};
pub use github_api::GitHubApiSink;

use crate::config::TargetRepository;
use crate::translator::TranslatedChangeRequest;
use async_trait::async_trait;
use serde::Serialize;

/// A pull request created on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedChangeRequest {
    /// GitHub PR number.
    pub number: u64,

    /// GitHub PR URL.
    pub url: String,
}

/// Write access to pull requests on the target provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeRequestSink: Send + Sync {
    /// Returns whether `target` exists and is accessible.
    async fn exists(&self, target: &TargetRepository) -> Result<bool, SinkError>;

    /// Creates `request` as a draft pull request on `target`.
    async fn create_draft(
        &self,
        target: &TargetRepository,
        request: &TranslatedChangeRequest,
    ) -> Result<CreatedChangeRequest, SinkError>;
}
