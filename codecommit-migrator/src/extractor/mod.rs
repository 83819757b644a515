//! Collects the open pull requests of the source repository.

use crate::config::SourceRepository;
use crate::progress::progress_bar;
use crate::source::{ChangeRequestSource, RawChangeRequest, RepositoryMetadata, SourceError};
use tracing::{info, info_span, Instrument};

/// Everything read from CodeCommit for one run.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Repository metadata, used for back-links.
    pub metadata: RepositoryMetadata,

    /// Open pull requests in listing order.
    pub requests: Vec<RawChangeRequest>,
}

/// Lists and fetches every open pull request of `repository`.
///
/// Details are fetched one at a time to stay well inside the CodeCommit API
/// quota. The result keeps the order of the listing call.
///
/// # Errors
///
/// Returns [`SourceError`] if listing, metadata or any single detail fetch
/// fails. A failed detail fetch is not skipped: a pull request that cannot be
/// read cannot be migrated, and dropping it silently would hide that.
pub async fn extract_change_requests(
    source: &dyn ChangeRequestSource,
    repository: &SourceRepository,
    show_progress: bool,
) -> Result<Extraction, SourceError> {
    let span = info_span!("extract", repository = %repository.name());

    async {
        info!("Listing open CodeCommit pull requests");
        let ids = source.list_open(repository.name()).await?;
        let metadata = source.repository_metadata(repository.name()).await?;
        info!(count = ids.len(), "Found open pull requests");

        let progress = progress_bar(ids.len(), show_progress, "Fetching pull requests");
        let mut requests = Vec::with_capacity(ids.len());
        for id in &ids {
            let request = source.get(id).await;
            progress.inc(1);
            requests.push(request?);
        }
        progress.finish_and_clear();

        Ok(Extraction { metadata, requests })
    }
    .instrument(span)
    .await
}
