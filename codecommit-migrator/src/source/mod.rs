//! CodeCommit side of the migration.
//!
//! [`ChangeRequestSource`] is the narrow capability the extractor needs;
//! [`AwsCliSource`] implements it over the AWS CLI.

mod codecommit;
mod error;
pub(crate) mod timestamp;
mod types;

pub use codecommit::{
    parse_get_pull_request, parse_get_repository, parse_list_pull_requests, AwsCliSource,
};
pub use error::SourceError;
pub use types::{PullRequestTarget, RawChangeRequest, RepositoryMetadata};

use async_trait::async_trait;

/// Read access to pull requests on the source provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeRequestSource: Send + Sync {
    /// Lists the identifiers of all open pull requests, in provider order.
    async fn list_open(&self, repository: &str) -> Result<Vec<String>, SourceError>;

    /// Fetches a single pull request.
    async fn get(&self, id: &str) -> Result<RawChangeRequest, SourceError>;

    /// Fetches repository metadata.
    async fn repository_metadata(&self, repository: &str)
        -> Result<RepositoryMetadata, SourceError>;
}
