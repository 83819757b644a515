//! GitHub access through the REST API.

use crate::config::TargetRepository;
use crate::rate_limit::ensure_core_rate_limit;
use crate::sink::{ChangeRequestSink, CreatedChangeRequest, SinkError};
use crate::translator::TranslatedChangeRequest;
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// Status GitHub answers with for a missing or inaccessible repository.
const NOT_FOUND: u16 = 404;

/// [`ChangeRequestSink`] backed by octocrab.
#[derive(Clone)]
pub struct GitHubApiSink {
    octocrab: Octocrab,
}

impl GitHubApiSink {
    /// Wraps an authenticated client.
    #[must_use]
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client from a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::GitHubError`] if the client cannot be built.
    pub fn from_token(token: impl Into<String>) -> Result<Self, SinkError> {
        let octocrab = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(octocrab))
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[async_trait]
impl ChangeRequestSink for GitHubApiSink {
    async fn exists(&self, target: &TargetRepository) -> Result<bool, SinkError> {
        debug!(repo = %target.full_name(), "Checking repository");
        match self.octocrab.repos(&target.owner, &target.name).get().await {
            Ok(_) => Ok(true),
            Err(e) if is_missing(error_status(&e)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_draft(
        &self,
        target: &TargetRepository,
        request: &TranslatedChangeRequest,
    ) -> Result<CreatedChangeRequest, SinkError> {
        ensure_core_rate_limit(&self.octocrab).await?;

        let pr = self
            .octocrab
            .pulls(&target.owner, &target.name)
            .create(request.title.as_str(), request.head.as_str(), request.base.as_str())
            .body(request.body.as_str())
            .draft(Some(true))
            .send()
            .await?;

        let html_url = pr.html_url.as_ref().map(ToString::to_string);
        let url = pull_request_url(html_url, target, pr.number);
        Ok(CreatedChangeRequest {
            number: pr.number,
            url,
        })
    }
}

/// Returns the HTTP status of an API error, if GitHub answered at all.
fn error_status(error: &octocrab::Error) -> Option<u16> {
    match error {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Whether a failed repository lookup means the repository does not exist.
fn is_missing(status: Option<u16>) -> bool {
    status == Some(NOT_FOUND)
}

/// Uses the URL GitHub returned, or builds the canonical one.
fn pull_request_url(html_url: Option<String>, target: &TargetRepository, number: u64) -> String {
    html_url.unwrap_or_else(|| format!("{}/pull/{number}", target.html_url()))
}
